pub(crate) mod background;
pub(crate) mod batch;
pub(crate) mod blur;
pub(crate) mod canvas;
pub(crate) mod composite;
pub(crate) mod logo;
pub(crate) mod slide;
pub(crate) mod text;
