use serde::{Deserialize, Serialize};

/// Класс ошибки, который видит слой отображения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Нет HTTP-ответа (сеть, таймаут, отмена), status = 0
    NetworkError,
    /// Сервер ответил 4xx/5xx
    HttpError,
    /// Тело ответа не является JSON
    ParseError,
    /// Проверка на клиенте до отправки запроса
    ValidationError,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NetworkError => "network",
            ErrorKind::HttpError => "http",
            ErrorKind::ParseError => "parse",
            ErrorKind::ValidationError => "validation",
        }
    }
}

/// `{ kind, message }` pair handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSurface {
    pub kind: ErrorKind,
    pub message: String,
}
