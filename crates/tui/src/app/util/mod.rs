pub(crate) mod text;

pub(crate) use text::sanitize_paste;
