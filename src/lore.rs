pub(crate) mod lines;
pub(crate) mod timing;
pub(crate) mod typewriter;
pub(crate) mod view;
