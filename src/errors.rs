use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum BookmarkError {
    NotFound(String),
    Validation(String),
    ReferentialIntegrity(String),
    BadRequest(String),
    StorageUnavailable(String),
    DatabaseConfig(String),
    DatabaseOperation(String),
    StoragePluginNotFound(String),
}

impl BookmarkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            BookmarkError::NotFound(_) => "E001",
            BookmarkError::Validation(_) => "E002",
            BookmarkError::ReferentialIntegrity(_) => "E003",
            BookmarkError::BadRequest(_) => "E004",
            BookmarkError::StorageUnavailable(_) => "E005",
            BookmarkError::DatabaseConfig(_) => "E006",
            BookmarkError::DatabaseOperation(_) => "E007",
            BookmarkError::StoragePluginNotFound(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            BookmarkError::NotFound(_) => "Resource Not Found",
            BookmarkError::Validation(_) => "Validation Error",
            BookmarkError::ReferentialIntegrity(_) => "Referential Integrity Error",
            BookmarkError::BadRequest(_) => "Bad Request",
            BookmarkError::StorageUnavailable(_) => "Storage Unavailable",
            BookmarkError::DatabaseConfig(_) => "Database Configuration Error",
            BookmarkError::DatabaseOperation(_) => "Database Operation Error",
            BookmarkError::StoragePluginNotFound(_) => "Storage Plugin Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            BookmarkError::NotFound(msg)
            | BookmarkError::Validation(msg)
            | BookmarkError::ReferentialIntegrity(msg)
            | BookmarkError::BadRequest(msg)
            | BookmarkError::StorageUnavailable(msg)
            | BookmarkError::DatabaseConfig(msg)
            | BookmarkError::DatabaseOperation(msg)
            | BookmarkError::StoragePluginNotFound(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码（只有路由层使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            BookmarkError::NotFound(_) => StatusCode::NOT_FOUND,
            BookmarkError::Validation(_)
            | BookmarkError::ReferentialIntegrity(_)
            | BookmarkError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否属于客户端输入问题（4xx）
    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }

    /// 格式化为彩色输出（用于 Server 启动失败）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BookmarkError {}

// 便捷的构造函数
impl BookmarkError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        BookmarkError::NotFound(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        BookmarkError::Validation(msg.into())
    }

    pub fn referential_integrity<T: Into<String>>(msg: T) -> Self {
        BookmarkError::ReferentialIntegrity(msg.into())
    }

    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        BookmarkError::BadRequest(msg.into())
    }

    pub fn storage_unavailable<T: Into<String>>(msg: T) -> Self {
        BookmarkError::StorageUnavailable(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        BookmarkError::DatabaseConfig(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        BookmarkError::DatabaseOperation(msg.into())
    }

    pub fn storage_plugin_not_found<T: Into<String>>(msg: T) -> Self {
        BookmarkError::StoragePluginNotFound(msg.into())
    }
}

/// 判断数据库错误是否属于连接类故障（连接池耗尽、断线）
pub fn is_connection_error(err: &sea_orm::DbErr) -> bool {
    use sea_orm::DbErr;

    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(runtime_err) | DbErr::Query(runtime_err) => {
            let err_str = runtime_err.to_string().to_lowercase();
            err_str.contains("connection refused")
                || err_str.contains("connection reset")
                || err_str.contains("broken pipe")
                || err_str.contains("pool timed out")
        }
        _ => false,
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for BookmarkError {
    fn from(err: sea_orm::DbErr) -> Self {
        if is_connection_error(&err) {
            BookmarkError::StorageUnavailable(err.to_string())
        } else {
            BookmarkError::DatabaseOperation(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, BookmarkError>;
