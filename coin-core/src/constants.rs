use std::time::Duration;

/// Сколько последних запросов помнит сессия
pub const HISTORY_CAPACITY: usize = 10;

/// Время жизни закэшированного справочника монет для графиков
pub const COIN_LIST_TTL: Duration = Duration::from_secs(60 * 60);

/// Окно графика по умолчанию, дней
pub const DEFAULT_CHART_DAYS: u32 = 7;

/// Максимальное окно графика, дней
pub const MAX_CHART_DAYS: u32 = 365;

/// Максимальная длина id сессии
pub const MAX_SESSION_ID_LEN: usize = 64;
