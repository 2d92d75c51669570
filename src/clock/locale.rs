//! Locales the date label can be rendered in.

/// Supported date-label locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Locale {
    #[default]
    EnUs,
    DeDe,
    FrFr,
    EsEs,
    ItIt,
    PtPt,
}

const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_DE: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];
const WEEKDAYS_FR: [&str; 7] = ["dim", "lun", "mar", "mer", "jeu", "ven", "sam"];
const WEEKDAYS_ES: [&str; 7] = ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"];
const WEEKDAYS_IT: [&str; 7] = ["dom", "lun", "mar", "mer", "gio", "ven", "sab"];
const WEEKDAYS_PT: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_DE: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];
const MONTHS_FR: [&str; 12] = [
    "janv", "févr", "mars", "avr", "mai", "juin", "juil", "août", "sept", "oct", "nov", "déc",
];
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];
const MONTHS_IT: [&str; 12] = [
    "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
];
const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

impl Locale {
    /// Resolve a system locale tag such as `"de_DE"` or `"fr-FR"`.
    ///
    /// Chinese variants have no glyph coverage on the panel font and fall
    /// back to `en_US`, as does anything unrecognised.
    pub fn from_system(tag: &str) -> Locale {
        let lang = tag
            .split(|c: char| c == '_' || c == '-' || c == '.')
            .next()
            .unwrap_or("");
        match lang {
            "de" => Locale::DeDe,
            "fr" => Locale::FrFr,
            "es" => Locale::EsEs,
            "it" => Locale::ItIt,
            "pt" => Locale::PtPt,
            _ => Locale::EnUs,
        }
    }

    /// Abbreviated weekday name, 0 = Sunday.
    pub fn weekday_abbr(self, weekday: u8) -> &'static str {
        let table = match self {
            Locale::EnUs => &WEEKDAYS_EN,
            Locale::DeDe => &WEEKDAYS_DE,
            Locale::FrFr => &WEEKDAYS_FR,
            Locale::EsEs => &WEEKDAYS_ES,
            Locale::ItIt => &WEEKDAYS_IT,
            Locale::PtPt => &WEEKDAYS_PT,
        };
        table[usize::from(weekday % 7)]
    }

    /// Abbreviated month name, 1 = January.
    pub fn month_abbr(self, month: u8) -> &'static str {
        let table = match self {
            Locale::EnUs => &MONTHS_EN,
            Locale::DeDe => &MONTHS_DE,
            Locale::FrFr => &MONTHS_FR,
            Locale::EsEs => &MONTHS_ES,
            Locale::ItIt => &MONTHS_IT,
            Locale::PtPt => &MONTHS_PT,
        };
        table[usize::from(month.clamp(1, 12) - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chinese_variants_fall_back_to_english() {
        assert_eq!(Locale::from_system("zh_CN"), Locale::EnUs);
        assert_eq!(Locale::from_system("zh_TW"), Locale::EnUs);
    }

    #[test]
    fn supported_tags_resolve() {
        assert_eq!(Locale::from_system("de_DE"), Locale::DeDe);
        assert_eq!(Locale::from_system("fr-FR"), Locale::FrFr);
        assert_eq!(Locale::from_system("es_ES.UTF-8"), Locale::EsEs);
        assert_eq!(Locale::from_system("en_US"), Locale::EnUs);
        assert_eq!(Locale::from_system(""), Locale::EnUs);
    }

    #[test]
    fn names_are_indexed_from_sunday_and_january() {
        assert_eq!(Locale::EnUs.weekday_abbr(0), "Sun");
        assert_eq!(Locale::EnUs.weekday_abbr(6), "Sat");
        assert_eq!(Locale::EnUs.month_abbr(1), "Jan");
        assert_eq!(Locale::EnUs.month_abbr(12), "Dec");
        assert_eq!(Locale::DeDe.month_abbr(10), "Okt");
    }
}
