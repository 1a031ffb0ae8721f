use clap::ValueEnum;

/// Язык интерфейса
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Lang {
    /// English
    En,
    /// اردو
    Ur,
    /// العربية
    Ar,
}

/// Подписи интерфейса на одном языке
#[derive(Debug, Clone, Copy)]
pub(crate) struct Labels {
    pub(crate) title: &'static str,
    pub(crate) search: &'static str,
    pub(crate) history: &'static str,
    pub(crate) updated: &'static str,
    pub(crate) error: &'static str,
    pub(crate) placeholder: &'static str,
    pub(crate) graph_title: &'static str,
    pub(crate) quote_title: &'static str,
    // ниже подписи есть только на английском
    pub(crate) empty_query: &'static str,
    pub(crate) no_history: &'static str,
    pub(crate) chart_missing: &'static str,
}

const EMPTY_QUERY: &str = "⚠️ Please enter a cryptocurrency name.";
const NO_HISTORY: &str = "No price history available.";
const CHART_MISSING: &str = "📉 Could not plot chart. Coin not found on CoinGecko.";

const EN: Labels = Labels {
    title: "💸 Real-Time Cryptocurrency Price Tracker",
    search: "Enter Cryptocurrency Name",
    history: "Last Searched Coins",
    updated: "Last Updated",
    error: "❌ Could not get data.",
    placeholder: "Try Bitcoin, ETH, Doge...",
    graph_title: "📈 Last 7 Days Price Chart (USD)",
    quote_title: "💬 Crypto Quote",
    empty_query: EMPTY_QUERY,
    no_history: NO_HISTORY,
    chart_missing: CHART_MISSING,
};

const UR: Labels = Labels {
    title: "💸 اصل وقت میں کرپٹو قیمتیں",
    search: "کرپٹو کرنسی کا نام درج کریں",
    history: "تاریخ میں تلاش شدہ سکے",
    updated: "آخری تازہ کاری",
    error: "❌ ڈیٹا حاصل نہ ہو سکا",
    placeholder: "Bitcoin، ETH، Doge آزمائیں...",
    graph_title: "📈 گزشتہ 7 دنوں کا قیمت گراف (USD)",
    quote_title: "💬 کرپٹو اقوال",
    empty_query: EMPTY_QUERY,
    no_history: NO_HISTORY,
    chart_missing: CHART_MISSING,
};

const AR: Labels = Labels {
    title: "💸 تتبع أسعار العملات الرقمية",
    search: "أدخل اسم العملة الرقمية",
    history: "العملات التي تم البحث عنها",
    updated: "آخر تحديث",
    error: "❌ لم يتم الحصول على البيانات",
    placeholder: "جرب Bitcoin، ETH، Doge...",
    graph_title: "📈 الرسم البياني لآخر 7 أيام (USD)",
    quote_title: "💬 اقتباسات العملات الرقمية",
    empty_query: EMPTY_QUERY,
    no_history: NO_HISTORY,
    chart_missing: CHART_MISSING,
};

pub(crate) fn labels(lang: Lang) -> &'static Labels {
    match lang {
        Lang::En => &EN,
        Lang::Ur => &UR,
        Lang::Ar => &AR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_all_labels() {
        for lang in Lang::value_variants() {
            let l = labels(*lang);
            for s in [
                l.title,
                l.search,
                l.history,
                l.updated,
                l.error,
                l.placeholder,
                l.graph_title,
                l.quote_title,
            ] {
                assert!(!s.trim().is_empty(), "{lang:?} has an empty label");
            }
        }
    }

    #[test]
    fn languages_differ() {
        assert_ne!(labels(Lang::En).updated, labels(Lang::Ur).updated);
        assert_ne!(labels(Lang::Ur).updated, labels(Lang::Ar).updated);
    }
}
