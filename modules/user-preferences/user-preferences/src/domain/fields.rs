pub struct PreferencesFields;

impl PreferencesFields {
    pub const DARK_MODE: &'static str = "darkMode";
    pub const LANGUAGE: &'static str = "language";
}
