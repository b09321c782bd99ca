pub(super) const DIVIDER_HEIGHT: u16 = 1;
pub(super) const MIN_BODY_HEIGHT: u16 = 5;
pub(super) const LOGIN_FORM_WIDTH: u16 = 52;
pub(super) const MAIL_LIST_WIDTH: u16 = 24;
pub(super) const NOTIFICATION_WIDTH: u16 = 44;
pub(super) const MAIL_ITEM_HEIGHT: u16 = 2;
