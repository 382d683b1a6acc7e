mod month;
mod util;
mod widget;
pub(crate) use self::month::DisplayedMonth;
pub(crate) use self::widget::{DatePicker, PickerHits, PickerTarget, PICKER_WIDTH};
