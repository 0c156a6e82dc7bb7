use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tempfile::TempDir;

pub const CUSTOMER_EMAILS: [&str; 3] = [
    "ada@example.com",
    "grace@example.com",
    "linus@example.com",
];

/// A populated SQLite file in a temporary directory. Deleted on drop.
pub struct SqliteFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl SqliteFixture {
    /// Retail database matching `retail_tables()`.
    pub fn retail() -> Self {
        let fixture = Self::empty();
        let conn = fixture.connect();
        conn.execute_batch(
            "CREATE TABLE Customers (
                customer_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                city TEXT NOT NULL,
                signup_date TEXT NOT NULL
            );
            CREATE TABLE Products (
                product_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL
            );
            CREATE TABLE Orders (
                order_id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL REFERENCES Customers(customer_id),
                product_id INTEGER NOT NULL REFERENCES Products(product_id),
                order_date TEXT NOT NULL,
                amount REAL NOT NULL,
                status TEXT NOT NULL
            );",
        )
        .unwrap();

        let customers = [
            (1, "Ada Lovelace", CUSTOMER_EMAILS[0], "London", "2023-01-04"),
            (2, "Grace Hopper", CUSTOMER_EMAILS[1], "Arlington", "2023-02-11"),
            (3, "Linus Torvalds", CUSTOMER_EMAILS[2], "Portland", "2023-03-19"),
        ];
        for c in customers {
            conn.execute(
                "INSERT INTO Customers VALUES (?1, ?2, ?3, ?4, ?5)",
                params![c.0, c.1, c.2, c.3, c.4],
            )
            .unwrap();
        }

        let products = [
            (1, "Keyboard", "hardware", 49.5),
            (2, "Monitor", "hardware", 189.0),
            (3, "Compiler Handbook", "books", 35.25),
        ];
        for p in products {
            conn.execute(
                "INSERT INTO Products VALUES (?1, ?2, ?3, ?4)",
                params![p.0, p.1, p.2, p.3],
            )
            .unwrap();
        }

        let orders = [
            (1, 1, 1, "2024-01-10", 49.5, "shipped"),
            (2, 1, 3, "2024-01-12", 35.25, "shipped"),
            (3, 2, 2, "2024-02-01", 189.0, "pending"),
            (4, 3, 1, "2024-02-14", 49.5, "cancelled"),
            (5, 2, 3, "2024-03-02", 35.25, "shipped"),
        ];
        for o in orders {
            conn.execute(
                "INSERT INTO Orders VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![o.0, o.1, o.2, o.3, o.4, o.5],
            )
            .unwrap();
        }
        drop(conn);
        fixture
    }

    /// A single `Events(event_id, kind)` table with `rows` rows.
    pub fn with_events(rows: usize) -> Self {
        let fixture = Self::empty();
        let mut conn = fixture.connect();
        conn.execute_batch("CREATE TABLE Events (event_id INTEGER PRIMARY KEY, kind TEXT NOT NULL);")
            .unwrap();
        let tx = conn.transaction().unwrap();
        {
            let mut stmt = tx.prepare("INSERT INTO Events (event_id, kind) VALUES (?1, ?2)").unwrap();
            for i in 0..rows {
                let kind = if i % 2 == 0 { "click" } else { "view" };
                stmt.execute(params![i as i64 + 1, kind]).unwrap();
            }
        }
        tx.commit().unwrap();
        drop(conn);
        fixture
    }

    fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemalink.db");
        Self { _dir: dir, path }
    }

    /// Read-write connection for test setup and assertions.
    pub fn connect(&self) -> Connection {
        Connection::open(&self.path).unwrap()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
