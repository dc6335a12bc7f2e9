pub(crate) mod pacer;
pub(crate) mod scheduler;
