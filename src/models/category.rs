/// Storage partition a category's monthly figure is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Expenses,
    Invoices,
}

impl Bucket {
    /// Name used in store keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expenses => "spese",
            Self::Invoices => "fatture",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "spese" | "expenses" | "spesa" => Some(Self::Expenses),
            "fatture" | "invoices" | "fattura" => Some(Self::Invoices),
            _ => None,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Alimentari,
    Bevande,
    Utilita,
    Manutenzioni,
    Marketing,
    Licenze,
    Commissioni,
    Lavanderia,
    Pulizia,
    SpeseVarie,
    Varie,
    Amministrazione,
    StaffCucina,
    StaffSala,
    StaffLavapiatti,
    StaffPulizie,
    Canone,
    Finanziamento1,
    Finanziamento2,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Self::Alimentari,
            Self::Bevande,
            Self::Utilita,
            Self::Manutenzioni,
            Self::Marketing,
            Self::Licenze,
            Self::Commissioni,
            Self::Lavanderia,
            Self::Pulizia,
            Self::SpeseVarie,
            Self::Varie,
            Self::Amministrazione,
            Self::StaffCucina,
            Self::StaffSala,
            Self::StaffLavapiatti,
            Self::StaffPulizie,
            Self::Canone,
            Self::Finanziamento1,
            Self::Finanziamento2,
        ]
    }

    /// Members of the personnel aggregate.
    pub fn personnel() -> &'static [Category] {
        &[
            Self::Amministrazione,
            Self::StaffCucina,
            Self::StaffSala,
            Self::StaffLavapiatti,
            Self::StaffPulizie,
        ]
    }

    /// Members of the rent and financing aggregate.
    pub fn financing() -> &'static [Category] {
        &[Self::Canone, Self::Finanziamento1, Self::Finanziamento2]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alimentari => "alimentari",
            Self::Bevande => "bevande",
            Self::Utilita => "utilita",
            Self::Manutenzioni => "manutenzioni",
            Self::Marketing => "marketing",
            Self::Licenze => "licenze",
            Self::Commissioni => "commissioni",
            Self::Lavanderia => "lavanderia",
            Self::Pulizia => "pulizia",
            Self::SpeseVarie => "spese-varie",
            Self::Varie => "varie",
            Self::Amministrazione => "amministrazione",
            Self::StaffCucina => "staff-cucina",
            Self::StaffSala => "staff-sala",
            Self::StaffLavapiatti => "staff-lavapiatti",
            Self::StaffPulizie => "staff-pulizie",
            Self::Canone => "canone",
            Self::Finanziamento1 => "finanziamento1",
            Self::Finanziamento2 => "finanziamento2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let id = s.trim().to_lowercase();
        Self::all().iter().copied().find(|c| c.as_str() == id)
    }

    /// Categories whose figure comes from supplier invoices.
    pub fn is_invoice_tracked(&self) -> bool {
        matches!(
            self,
            Self::Alimentari
                | Self::Bevande
                | Self::Utilita
                | Self::Manutenzioni
                | Self::Marketing
                | Self::Licenze
                | Self::Commissioni
                | Self::Lavanderia
                | Self::Pulizia
                | Self::SpeseVarie
                | Self::Varie
        )
    }

    pub fn bucket(&self) -> Bucket {
        if self.is_invoice_tracked() {
            Bucket::Invoices
        } else {
            Bucket::Expenses
        }
    }

    pub fn label(&self) -> String {
        crate::evaluate::category_label(self.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
