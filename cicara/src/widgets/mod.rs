mod resizeable_container;

use resizeable_container::ResizeableContainer;

use elements::{Error, Window};

/// Registers every element the application ships with.
pub fn register_all(window: &mut Window) -> Result<(), Error> {
    ResizeableContainer::register(window)?;
    Ok(())
}
