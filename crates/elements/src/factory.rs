//! Fixed-tag shorthands for [`Ui::create_element`].
//!
//! ```ignore
//! let body = ui.body();
//! let list = ul(&mut ui, [ElementArg::parent(body)])?;
//! li(&mut ui, [ElementArg::parent(list), "first".into()])?;
//! ```

use core_types::Eid;

use crate::error::BuildError;
use crate::ui::{ElementArg, Ui};

macro_rules! define_element {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a wrapped `<", stringify!($name), ">` element.")]
            pub fn $name(
                ui: &mut Ui,
                args: impl IntoIterator<Item = ElementArg>,
            ) -> Result<Eid, BuildError> {
                ui.create_element(stringify!($name), args)
            }
        )*
    };
}

define_element!(
    div, p, ul, li, a, b, span, label, table, thead, tbody, tfoot, tr, th, td, h1, h2, h3, h4,
    h5, h6, form, button, input, section, header, footer, canvas,
);
