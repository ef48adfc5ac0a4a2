use std::cell::RefCell;
use std::rc::Rc;

use dom::{CustomElementState, DomException};
use elements::{CustomElement, ElementOptions, Error, HostElement, ResourceMap, Value, Window};

thread_local! {
    static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn record(entry: impl Into<String>) {
    LOG.with(|log| log.borrow_mut().push(entry.into()));
}

fn take_log() -> Vec<String> {
    LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

#[derive(Default)]
struct Splitter;

impl CustomElement for Splitter {
    fn initial_value(&self, property: &str) -> Value {
        match property {
            "direction" => "right".into(),
            _ => Value::Null,
        }
    }

    fn on_connected(&mut self, host: &mut HostElement<'_>) -> Result<(), Error> {
        record(format!("connected direction={}", host.property("direction")?));
        host.set_property("size", 10)?;
        record("connected done");
        Ok(())
    }

    fn on_disconnected(&mut self, _host: &mut HostElement<'_>) -> Result<(), Error> {
        record("disconnected");
        Ok(())
    }

    fn on_adopted(&mut self, _host: &mut HostElement<'_>) -> Result<(), Error> {
        record("adopted");
        Ok(())
    }

    fn on_attribute_changed(
        &mut self,
        _host: &mut HostElement<'_>,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Result<(), Error> {
        record(format!("{name}: {old_value:?} -> {new_value:?}"));
        Ok(())
    }
}

fn window() -> Window {
    let mut window = Window::new(ResourceMap::new());
    window
        .define::<Splitter>()
        .bind_attribute("direction", "direction")
        .bind_attribute("size", "size")
        .register(ElementOptions::new("x-splitter"))
        .unwrap();
    take_log();
    window
}

#[test]
fn duplicate_selector_is_rejected() {
    #[derive(Default)]
    struct Other;
    impl CustomElement for Other {}

    let mut window = window();
    let result = window.register_element::<Other>(ElementOptions::new("x-splitter"));
    assert!(matches!(result, Err(Error::Dom(DomException::NotSupportedError))));
}

#[test]
fn registering_a_type_twice_is_rejected() {
    let mut window = window();
    let splitter = window.create_element("x-splitter").unwrap();
    let first = window.metadata_of(splitter);
    let result = window.register_element::<Splitter>(ElementOptions::new("x-splitter-two"));
    assert!(matches!(result, Err(Error::Dom(DomException::NotSupportedError))));

    // The record the first registration handed out is unchanged.
    assert_eq!(first.unwrap().selector(), Some("x-splitter"));
}

#[test]
fn invalid_selector_is_rejected() {
    #[derive(Default)]
    struct Shouting;
    impl CustomElement for Shouting {}

    let mut window = window();
    for selector in ["splitter", "X-splitter", "font-face"] {
        let result = window.register_element::<Shouting>(ElementOptions::new(selector));
        assert!(
            matches!(result, Err(Error::Dom(DomException::SyntaxError))),
            "{selector}"
        );
    }
}

#[test]
fn attributes_written_in_a_hook_are_delivered_after_it() {
    let mut window = window();
    let splitter = window.create_element("x-splitter").unwrap();
    let document = window.document();
    window.dom_mut().append_child(document, splitter).unwrap();

    assert_eq!(
        take_log(),
        vec![
            "connected direction=right",
            "connected done",
            "direction: None -> Some(\"right\")",
            "size: None -> Some(\"10\")",
        ]
    );
}

#[test]
fn elements_created_before_definition_are_upgraded() {
    #[derive(Default)]
    struct Late;
    impl CustomElement for Late {
        fn on_connected(&mut self, host: &mut HostElement<'_>) -> Result<(), Error> {
            record(format!("late connected {}", host.node()));
            Ok(())
        }
    }

    let mut window = window();
    window
        .load_document("<body><x-late title=\"a\"></x-late></body>")
        .unwrap();
    let late = window.dom().find_element(window.document(), "x-late").unwrap();
    assert_eq!(
        window.dom().custom_element_state(late),
        Some(CustomElementState::Undefined)
    );
    assert!(take_log().is_empty());

    window
        .register_element::<Late>(ElementOptions::new("x-late"))
        .unwrap();
    assert_eq!(
        window.dom().custom_element_state(late),
        Some(CustomElementState::Custom)
    );
    assert_eq!(take_log(), vec![format!("late connected {late}")]);
}

#[test]
fn removal_and_adoption_reach_the_hooks() {
    let mut window = window();
    let splitter = window.create_element("x-splitter").unwrap();
    let document = window.document();
    window.dom_mut().append_child(document, splitter).unwrap();
    take_log();

    window.dom_mut().remove_child(document, splitter).unwrap();
    let other = window.dom_mut().create_document();
    window.dom_mut().adopt_node(other, splitter).unwrap();

    assert_eq!(take_log(), vec!["disconnected", "adopted"]);
}

#[test]
fn hook_errors_do_not_stop_dispatch() {
    #[derive(Default)]
    struct Faulty;
    impl CustomElement for Faulty {
        fn on_connected(&mut self, _host: &mut HostElement<'_>) -> Result<(), Error> {
            Err(Error::msg("boom"))
        }

        fn on_disconnected(&mut self, _host: &mut HostElement<'_>) -> Result<(), Error> {
            record("faulty disconnected");
            Ok(())
        }
    }

    let mut window = window();
    window
        .register_element::<Faulty>(ElementOptions::new("x-faulty"))
        .unwrap();
    let faulty = window.create_element("x-faulty").unwrap();
    let document = window.document();
    window.dom_mut().append_child(document, faulty).unwrap();
    window.dom_mut().remove_child(document, faulty).unwrap();

    assert_eq!(take_log(), vec!["faulty disconnected"]);
}

#[test]
fn metadata_is_shared_through_rc() {
    let mut window = window();
    let a = window.create_element("x-splitter").unwrap();
    let b = window.create_element("x-splitter").unwrap();
    let metadata = window.metadata_of(a).unwrap();
    assert!(Rc::ptr_eq(&metadata, &window.metadata_of(b).unwrap()));
    assert_eq!(metadata.observed_attributes(), vec!["direction", "size"]);
}
