pub(crate) mod particles;
pub(crate) mod render_loop;
pub(crate) mod surface;
