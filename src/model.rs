pub(crate) mod deck;
pub(crate) mod dsl;
pub(crate) mod settings;
pub(crate) mod slide;
