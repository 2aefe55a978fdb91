//! Page-side counterpart of the host bridge: the bound controls, their error
//! slots, the form title and the blocking notification.

use crate::presenter::Presentation;

pub trait FormView {
    /// Write the (normalized) value back into the bound control.
    fn set_value(&mut self, field: &str, value: &str);

    /// Reflect a verdict into the control's visual state and error slot.
    fn show_field(&mut self, field: &str, presentation: &Presentation);

    fn set_title(&mut self, text: &str);

    /// Single blocking notification, e.g. a failed submission.
    fn alert(&mut self, message: &str);
}
