pub(crate) mod discovery;
pub(crate) mod playlist;
