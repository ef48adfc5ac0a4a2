use elements::{CustomElement, ElementOptions, Error, HostElement, TemplateState, Value, Window};

const SELECTOR: &str = "cicara-resizeable-container";
const TEMPLATE_URL: &str = "templates/resizeable-container.element.html";

/// A container with a drag handle on one of its edges.
#[derive(Debug, Default)]
pub struct ResizeableContainer;

impl ResizeableContainer {
    pub fn register(window: &mut Window) -> Result<(), Error> {
        window
            .define::<Self>()
            .bind_attribute("direction", "direction")
            .register(
                ElementOptions::new(SELECTOR)
                    .shadow_dom(true)
                    .template_url(TEMPLATE_URL),
            )?;
        Ok(())
    }
}

impl CustomElement for ResizeableContainer {
    fn initial_value(&self, property: &str) -> Value {
        match property {
            "direction" => "right".into(),
            _ => Value::Null,
        }
    }

    fn on_connected(&mut self, host: &mut HostElement<'_>) -> Result<(), Error> {
        let pending = host
            .template()
            .is_some_and(|template| template.state() == TemplateState::Pending);
        if !host.stamp_template()? && pending {
            tracing::warn!(element = %host.node(), "template not loaded yet");
        }
        let direction = host.property("direction")?;
        tracing::info!(element = %host.node(), %direction, "{}", host.inner_html().trim());
        Ok(())
    }
}
