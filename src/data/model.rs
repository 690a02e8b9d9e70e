use std::fmt;

/// Header of the symbol column in every supported input format.
pub const SYMBOL_COLUMN: &str = "Symbol";
/// Header of the first-ionization-energy column (eV).
pub const ENERGY_COLUMN: &str = "Ionization_Energy_eV";

// ---------------------------------------------------------------------------
// ElementRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single element as read from the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub symbol: String,
    /// First ionization energy in electron-volts.
    pub ionization_energy_ev: f64,
}

impl ElementRecord {
    pub fn new(symbol: impl Into<String>, ionization_energy_ev: f64) -> Self {
        Self {
            symbol: symbol.into(),
            ionization_energy_ev,
        }
    }
}

// ---------------------------------------------------------------------------
// ElementDataset – the loaded table, in source row order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDataset {
    pub records: Vec<ElementRecord>,
}

impl ElementDataset {
    pub fn from_records(records: Vec<ElementRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Symbols in row order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.symbol.as_str())
    }
}

// ---------------------------------------------------------------------------
// ElementFrequency – a record augmented with its derived frequency
// ---------------------------------------------------------------------------

/// An element together with its ionization frequency. The frequency lives on
/// the record itself so symbol and value can never drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFrequency {
    pub element: ElementRecord,
    pub frequency_hz: f64,
}

impl ElementFrequency {
    pub fn symbol(&self) -> &str {
        &self.element.symbol
    }
}

impl fmt::Display for ElementFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} eV) -> {:.4e} Hz",
            self.element.symbol, self.element.ionization_energy_ev, self.frequency_hz
        )
    }
}

/// The derived dataset handed read-only to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyDataset {
    pub elements: Vec<ElementFrequency>,
}

impl FrequencyDataset {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.symbol())
    }

    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.elements.iter().map(|e| e.frequency_hz)
    }

    pub fn get(&self, symbol: &str) -> Option<&ElementFrequency> {
        self.elements.iter().find(|e| e.symbol() == symbol)
    }
}
