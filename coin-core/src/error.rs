use std::time::Duration;

use thiserror::Error;

/// Ошибки протокола
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// пустая команда
    #[error("empty command")]
    EmptyCommand,

    /// Неизвестная команда
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Не передан id сессии
    #[error("missing session id")]
    MissingSession,

    /// id сессии содержит недопустимые символы или слишком длинный
    #[error("invalid session id: {0}")]
    InvalidSession(String),

    /// Не передан текст запроса
    #[error("missing query")]
    MissingQuery,

    /// Не передано число дней для графика
    #[error("missing days")]
    MissingDays,

    /// Число дней вне диапазона или не число
    #[error("invalid days: {0}")]
    InvalidDays(String),

    /// Лишние аргументы
    #[error("unexpected extra arguments")]
    ExtraArgs,

    /// Ответ сервера не распознан
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// Ошибки внешнего фида котировок.
///
/// "Фид лежит" и "фид медленный" различаются: `Unreachable` против `Timeout`.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Соединение не установлено (DNS, refused, TLS, ...)
    #[error("feed unreachable: {0}")]
    Unreachable(String),

    /// Фид не уложился в таймаут
    #[error("feed timed out after {0:?}")]
    Timeout(Duration),

    /// Фид ответил не-2xx статусом
    #[error("feed returned HTTP {0}")]
    Status(u16),

    /// Тело ответа не разобрано
    #[error("malformed feed body: {0}")]
    Parse(String),
}

impl FeedError {
    /// Транспортная ошибка (всё, кроме кривого тела)
    pub fn is_transport(&self) -> bool {
        !matches!(self, FeedError::Parse(_))
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Parse(e.to_string())
    }
}
