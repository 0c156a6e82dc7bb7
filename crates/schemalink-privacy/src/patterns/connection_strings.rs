use regex::Regex;
use std::sync::LazyLock;

use super::BuiltinPattern;

macro_rules! conn_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

conn_pattern!(RE_POSTGRES, r"(?i)postgres(?:ql)?://[^:\s]+:[^@\s]+@[^\s]+");
conn_pattern!(RE_MYSQL, r"(?i)mysql://[^:\s]+:[^@\s]+@[^\s]+");
conn_pattern!(RE_MONGODB, r"(?i)mongodb(?:\+srv)?://[^:\s]+:[^@\s]+@[^\s]+");
conn_pattern!(RE_REDIS, r"(?i)rediss?://[^:\s]*:[^@\s]+@[^\s]+");
conn_pattern!(RE_JDBC, r"(?i)jdbc:[a-z]+://[^:\s]+:[^@\s]+@[^\s]+");
conn_pattern!(
    RE_MSSQL,
    r"(?i)(?:Server|Data Source)=[^;]+;.*(?:Password|Pwd)=[^;]+"
);

pub fn all_patterns() -> Vec<BuiltinPattern> {
    vec![
        BuiltinPattern::connection("postgresql", &RE_POSTGRES, "[POSTGRES_CONN]"),
        BuiltinPattern::connection("mysql", &RE_MYSQL, "[MYSQL_CONN]"),
        BuiltinPattern::connection("mongodb", &RE_MONGODB, "[MONGODB_CONN]"),
        BuiltinPattern::connection("redis", &RE_REDIS, "[REDIS_CONN]"),
        BuiltinPattern::connection("jdbc", &RE_JDBC, "[JDBC_CONN]"),
        BuiltinPattern::connection("mssql", &RE_MSSQL, "[MSSQL_CONN]"),
    ]
}
