#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Gennaio,
    Febbraio,
    Marzo,
    Aprile,
    Maggio,
    Giugno,
    Luglio,
    Agosto,
    Settembre,
    Ottobre,
    Novembre,
    Dicembre,
}

impl Month {
    pub fn all() -> &'static [Month] {
        &[
            Self::Gennaio,
            Self::Febbraio,
            Self::Marzo,
            Self::Aprile,
            Self::Maggio,
            Self::Giugno,
            Self::Luglio,
            Self::Agosto,
            Self::Settembre,
            Self::Ottobre,
            Self::Novembre,
            Self::Dicembre,
        ]
    }

    /// Lower-case name, as used in store keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gennaio => "gennaio",
            Self::Febbraio => "febbraio",
            Self::Marzo => "marzo",
            Self::Aprile => "aprile",
            Self::Maggio => "maggio",
            Self::Giugno => "giugno",
            Self::Luglio => "luglio",
            Self::Agosto => "agosto",
            Self::Settembre => "settembre",
            Self::Ottobre => "ottobre",
            Self::Novembre => "novembre",
            Self::Dicembre => "dicembre",
        }
    }

    /// Capitalized name for reports ("Gennaio").
    pub fn display_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// 1-based calendar index.
    pub fn index(&self) -> u8 {
        Self::all()
            .iter()
            .position(|m| m == self)
            .map_or(1, |i| i as u8 + 1)
    }

    pub fn from_index(index: u32) -> Option<Self> {
        let i = usize::try_from(index).ok()?.checked_sub(1)?;
        Self::all().get(i).copied()
    }

    /// Accepts the full name, a month number (`3`, `03`) or a short alias
    /// (`mar`, `sett`). Anything else is not a month.
    pub fn parse(s: &str) -> Option<Self> {
        let m = s.trim().to_lowercase();
        if !m.is_empty() && m.chars().all(|c| c.is_ascii_digit()) {
            return m.parse::<u32>().ok().and_then(Self::from_index);
        }
        let full = match m.as_str() {
            "gen" => "gennaio",
            "feb" => "febbraio",
            "mar" => "marzo",
            "apr" => "aprile",
            "mag" => "maggio",
            "giu" => "giugno",
            "lug" => "luglio",
            "ago" => "agosto",
            "set" | "sett" | "sep" => "settembre",
            "ott" => "ottobre",
            "nov" => "novembre",
            "dic" => "dicembre",
            other => other,
        };
        Self::all().iter().copied().find(|month| month.as_str() == full)
    }

    pub fn next(&self) -> Self {
        Self::from_index(u32::from(self.index()) % 12 + 1).unwrap_or(Self::Gennaio)
    }

    pub fn prev(&self) -> Self {
        Self::from_index((u32::from(self.index()) + 10) % 12 + 1).unwrap_or(Self::Dicembre)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
