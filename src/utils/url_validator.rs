//! URL 验证模块
//!
//! 书签 URL 必须是带主机名的 http(s) 绝对地址；favicon 地址由它推导。

use url::Url;

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    MissingHost,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::MissingHost => write!(f, "URL has no host"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 解析并校验书签 URL
pub fn parse_bookmark_url(url: &str) -> Result<Url, UrlValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    // Url 会把 scheme 规范化为小写
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::InvalidProtocol(format!("{}:", other))),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(parsed)
}

pub fn validate_url(url: &str) -> Result<(), UrlValidationError> {
    parse_bookmark_url(url).map(|_| ())
}

/// 返回给客户端的字段错误消息
pub fn validation_error_message(error: &UrlValidationError) -> &'static str {
    match error {
        UrlValidationError::EmptyUrl => "URL is required",
        UrlValidationError::InvalidProtocol(_) => "URL must start with http:// or https://",
        UrlValidationError::MissingHost | UrlValidationError::InvalidFormat(_) => {
            "Must be a valid URL"
        }
    }
}

/// 由书签 URL 推导站点图标地址：`{scheme}://{host[:port]}/favicon.ico`
///
/// 非默认端口会保留；URL 无效时返回 `None`。
pub fn favicon_url(url: &str) -> Option<String> {
    let parsed = parse_bookmark_url(url).ok()?;
    let host = parsed.host_str()?;

    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}/favicon.ico", parsed.scheme(), host, port),
        None => format!("{}://{}/favicon.ico", parsed.scheme(), host),
    })
}
