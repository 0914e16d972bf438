//! Birth Details Form
//!
//! Field state and editing for the data-entry screen, plus the validator
//! that turns raw input into a wire-ready request. The form is plain
//! state; it never talks to the network itself.

pub mod validator;

pub use validator::{validate, normalize_time, RawBirthInput, ValidationError};

/// Fields of the birth form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Date,
    Time,
    Place,
    Latitude,
    Longitude,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Date,
        FormField::Time,
        FormField::Place,
        FormField::Latitude,
        FormField::Longitude,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Date => "Birth Date (YYYY-MM-DD)",
            FormField::Time => "Birth Time (HH:MM)",
            FormField::Place => "Place",
            FormField::Latitude => "Latitude",
            FormField::Longitude => "Longitude",
        }
    }

    pub fn next(&self) -> FormField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> FormField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Quick-select city presets with known coordinates.
pub const CITY_PRESETS: [(&str, f64, f64); 6] = [
    ("Delhi", 28.6139, 77.2090),
    ("Mumbai", 19.0760, 72.8777),
    ("Bangalore", 12.9716, 77.5946),
    ("Chennai", 13.0827, 80.2707),
    ("Kolkata", 22.5726, 88.3639),
    ("Hyderabad", 17.3850, 78.4867),
];

/// Editable state of the birth form.
#[derive(Debug, Clone)]
pub struct BirthForm {
    pub input: RawBirthInput,
    pub focus: FormField,
    preset_cursor: usize,
}

impl BirthForm {
    pub fn new() -> Self {
        Self {
            input: RawBirthInput {
                date: "1995-08-15".into(),
                time: "10:30".into(),
                ..RawBirthInput::default()
            },
            focus: FormField::Name,
            preset_cursor: 0,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.input.name,
            FormField::Date => &mut self.input.date,
            FormField::Time => &mut self.input.time,
            FormField::Place => &mut self.input.place,
            FormField::Latitude => &mut self.input.latitude,
            FormField::Longitude => &mut self.input.longitude,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.input.name,
            FormField::Date => &self.input.date,
            FormField::Time => &self.input.time,
            FormField::Place => &self.input.place,
            FormField::Latitude => &self.input.latitude,
            FormField::Longitude => &self.input.longitude,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn push_char(&mut self, c: char) {
        let focus = self.focus;
        self.field_mut(focus).push(c);
    }

    pub fn pop_char(&mut self) {
        let focus = self.focus;
        self.field_mut(focus).pop();
    }

    /// Fill place and coordinates from the next city preset in rotation.
    pub fn apply_next_preset(&mut self) {
        let (name, lat, lon) = CITY_PRESETS[self.preset_cursor % CITY_PRESETS.len()];
        self.preset_cursor += 1;
        self.input.place = name.to_string();
        self.input.latitude = format!("{lat:.4}");
        self.input.longitude = format!("{lon:.4}");
    }

    /// Validate the current content.
    pub fn validate(&self) -> Result<crate::models::BirthDetails, ValidationError> {
        validator::validate(&self.input)
    }
}

impl Default for BirthForm {
    fn default() -> Self {
        Self::new()
    }
}
