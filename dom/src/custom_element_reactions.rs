use std::collections::VecDeque;
use std::rc::Rc;

use crate::custom_element_definition::CustomElementDefinition;
use crate::element::CustomElementState;
use crate::{Dom, NodeId};

/// A lifecycle callback invocation waiting in the reaction queue.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum CustomElementCallback {
    Connected,
    Disconnected,
    Adopted {
        old_document: NodeId,
        new_document: NodeId,
    },
    AttributeChanged {
        name: String,
        old_value: Option<String>,
        new_value: Option<String>,
    },
}

// SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#custom-element-reaction-queue
#[derive(Debug, Clone)]
pub(crate) enum CustomElementReaction {
    Upgrade(Rc<CustomElementDefinition>),
    Callback(CustomElementCallback),
}

/// Reactions are delivered in the order they were enqueued, once the outermost
/// DOM operation has finished.
#[derive(Debug, Default)]
pub(crate) struct ReactionQueue {
    queue: VecDeque<(NodeId, CustomElementReaction)>,
    processing: bool,
}

impl ReactionQueue {
    pub(crate) fn enqueue(&mut self, element: NodeId, reaction: CustomElementReaction) {
        self.queue.push_back((element, reaction));
    }

    fn enqueue_front(&mut self, reactions: Vec<(NodeId, CustomElementReaction)>) {
        for reaction in reactions.into_iter().rev() {
            self.queue.push_front(reaction);
        }
    }

    fn discard(&mut self, element: NodeId) {
        self.queue.retain(|(target, _)| *target != element);
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}

impl Dom {
    // SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#enqueue-a-custom-element-callback-reaction
    pub(crate) fn enqueue_custom_element_callback_reaction(
        &mut self,
        element: NodeId,
        callback: CustomElementCallback,
    ) {
        let Some(data) = self.node(element).as_element() else {
            return;
        };
        if !data.is_custom() {
            return;
        }

        // 1. Let definition be element's custom element definition.
        let Some(definition) = data.custom_element_definition.as_ref() else {
            return;
        };

        // 4. If callbackName is "attributeChangedCallback", then:
        //   2. If definition's observed attributes does not contain attributeName, then return.
        if let CustomElementCallback::AttributeChanged { name, .. } = &callback {
            if !definition.observes(name) {
                return;
            }
        }

        // 5. Add a new callback reaction to element's custom element reaction queue.
        self.reactions
            .enqueue(element, CustomElementReaction::Callback(callback));
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#concept-try-upgrade
    pub(crate) fn try_upgrade(&mut self, element: NodeId) {
        let Some(data) = self.node(element).as_element() else {
            return;
        };
        if data.custom_element_state != CustomElementState::Undefined {
            return;
        }

        // 1. Let definition be the result of looking up a custom element definition given element's node document,
        //    element's namespace, element's local name, and element's is value.
        let local_name = data.local_name.clone();
        let document = self.node_document(element);

        // 2. If definition is not null, then enqueue a custom element upgrade reaction given element and definition.
        if let Some(definition) = self.look_up_custom_element_definition(document, &local_name) {
            self.reactions
                .enqueue(element, CustomElementReaction::Upgrade(definition));
        }
    }

    /// Delivers every pending custom element reaction.
    ///
    /// Calls made while reactions are being delivered only enqueue; the outermost
    /// call drains the queue, including anything the callbacks enqueued.
    pub fn process_reactions(&mut self) {
        if self.reactions.processing {
            return;
        }

        self.reactions.processing = true;
        while let Some((element, reaction)) = self.reactions.queue.pop_front() {
            match reaction {
                CustomElementReaction::Upgrade(definition) => self.upgrade(element, definition),
                CustomElementReaction::Callback(callback) => self.invoke_callback(element, callback),
            }
        }
        self.reactions.processing = false;
    }

    pub fn has_pending_reactions(&self) -> bool {
        self.reactions.len() > 0
    }

    fn invoke_callback(&mut self, element: NodeId, callback: CustomElementCallback) {
        let Some(mut instance) = self.instances.remove(&element) else {
            return;
        };

        tracing::trace!(%element, ?callback, "invoking custom element callback");
        match &callback {
            CustomElementCallback::Connected => instance.connected_callback(self, element),
            CustomElementCallback::Disconnected => instance.disconnected_callback(self, element),
            CustomElementCallback::Adopted {
                old_document,
                new_document,
            } => instance.adopted_callback(self, element, *old_document, *new_document),
            CustomElementCallback::AttributeChanged {
                name,
                old_value,
                new_value,
            } => instance.attribute_changed_callback(
                self,
                element,
                name,
                old_value.as_deref(),
                new_value.as_deref(),
            ),
        }

        self.instances.insert(element, instance);
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/custom-elements.html#concept-upgrade-an-element
    pub(crate) fn upgrade(&mut self, element: NodeId, definition: Rc<CustomElementDefinition>) {
        let connected = self.is_connected(element);
        let Some(data) = self.node_mut(element).as_element_mut() else {
            return;
        };

        // 1. If element's custom element state is not "undefined" or "uncustomized", then return.
        if !matches!(
            data.custom_element_state,
            CustomElementState::Undefined | CustomElementState::Uncustomized
        ) {
            return;
        }

        // 2. Set element's custom element definition to definition.
        data.custom_element_definition = Some(definition.clone());

        // 3. Set element's custom element state to "failed".
        data.custom_element_state = CustomElementState::Failed;

        // 4. For each attribute in element's attribute list, in order, enqueue a custom element callback reaction
        //    with element, callback name "attributeChangedCallback", and « attribute's local name, null, attribute's value ».
        let mut pending: Vec<(NodeId, CustomElementReaction)> = data
            .attributes
            .iter()
            .filter(|attribute| definition.observes(&attribute.name))
            .map(|attribute| {
                let callback = CustomElementCallback::AttributeChanged {
                    name: attribute.name.clone(),
                    old_value: None,
                    new_value: Some(attribute.value.clone()),
                };
                (element, CustomElementReaction::Callback(callback))
            })
            .collect();

        // 5. If element is connected, then enqueue a custom element callback reaction with element, callback name "connectedCallback".
        if connected {
            pending.push((
                element,
                CustomElementReaction::Callback(CustomElementCallback::Connected),
            ));
        }

        // 8. Let constructResult be the result of constructing C, with no arguments.
        match (definition.constructor)(self, element) {
            Ok(instance) => {
                // 10. Set element's custom element state to "custom".
                if let Some(data) = self.node_mut(element).as_element_mut() {
                    data.custom_element_state = CustomElementState::Custom;
                }
                self.instances.insert(element, instance);
                self.reactions.enqueue_front(pending);
                tracing::debug!(%element, name = %definition.name, "upgraded custom element");
            }
            Err(error) => {
                // 9.1. Set element's custom element definition to null.
                if let Some(data) = self.node_mut(element).as_element_mut() {
                    data.custom_element_definition = None;
                }
                // 9.2. Empty element's custom element reaction queue.
                self.reactions.discard(element);
                tracing::error!(%element, name = %definition.name, %error, "failed to construct custom element");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;
    use std::cell::RefCell;

    use super::*;
    use crate::{CustomElementCallbacks, DomException};

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        log: Log,
    }

    impl CustomElementCallbacks for Recorder {
        fn connected_callback(&mut self, _dom: &mut Dom, element: NodeId) {
            self.log.borrow_mut().push(format!("connected {element}"));
        }

        fn disconnected_callback(&mut self, _dom: &mut Dom, element: NodeId) {
            self.log.borrow_mut().push(format!("disconnected {element}"));
        }

        fn attribute_changed_callback(
            &mut self,
            _dom: &mut Dom,
            _element: NodeId,
            name: &str,
            old_value: Option<&str>,
            new_value: Option<&str>,
        ) {
            self.log
                .borrow_mut()
                .push(format!("{name}: {old_value:?} -> {new_value:?}"));
        }
    }

    fn recorder_definition(name: &str, log: &Log) -> CustomElementDefinition {
        let log = log.clone();
        CustomElementDefinition::new(
            name,
            TypeId::of::<Recorder>(),
            move |_, _| {
                log.borrow_mut().push("constructed".to_string());
                Ok(Box::new(Recorder { log: log.clone() }))
            },
        )
        .with_observed_attributes(["direction"])
    }

    #[test]
    fn upgrade_on_define_delivers_attributes_then_connected() {
        let log = Log::default();
        let mut dom = Dom::new();
        let document = dom.create_document();
        let element = dom.create_element(document, "x-recorder").unwrap();
        dom.set_attribute(element, "direction", "left").unwrap();
        dom.set_attribute(element, "title", "ignored").unwrap();
        dom.append_child(document, element).unwrap();
        assert_eq!(dom.custom_element_state(element), Some(CustomElementState::Undefined));

        dom.define(recorder_definition("x-recorder", &log)).unwrap();

        assert_eq!(dom.custom_element_state(element), Some(CustomElementState::Custom));
        assert_eq!(
            *log.borrow(),
            vec![
                "constructed".to_string(),
                "direction: None -> Some(\"left\")".to_string(),
                format!("connected {element}"),
            ]
        );
    }

    #[test]
    fn only_observed_attributes_are_delivered() {
        let log = Log::default();
        let mut dom = Dom::new();
        let document = dom.create_document();
        dom.define(recorder_definition("x-recorder", &log)).unwrap();

        let element = dom.create_element(document, "x-recorder").unwrap();
        dom.set_attribute(element, "title", "a").unwrap();
        dom.set_attribute(element, "direction", "up").unwrap();
        dom.remove_attribute(element, "direction").unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "constructed".to_string(),
                "direction: None -> Some(\"up\")".to_string(),
                "direction: Some(\"up\") -> None".to_string(),
            ]
        );
    }

    #[test]
    fn failed_construction_leaves_element_failed() {
        struct Broken;
        impl CustomElementCallbacks for Broken {}

        let mut dom = Dom::new();
        let document = dom.create_document();
        dom.define(CustomElementDefinition::new(
            "x-broken",
            TypeId::of::<Broken>(),
            |_, _| Err(DomException::NotSupportedError),
        ))
        .unwrap();

        let element = dom.create_element(document, "x-broken").unwrap();
        assert_eq!(dom.custom_element_state(element), Some(CustomElementState::Failed));
        assert!(dom.custom_element_definition(element).is_none());
        assert!(!dom.has_pending_reactions());
    }

    #[test]
    fn disconnect_is_delivered_on_removal() {
        let log = Log::default();
        let mut dom = Dom::new();
        let document = dom.create_document();
        dom.define(recorder_definition("x-recorder", &log)).unwrap();

        let element = dom.create_element(document, "x-recorder").unwrap();
        dom.append_child(document, element).unwrap();
        dom.remove_child(document, element).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "constructed".to_string(),
                format!("connected {element}"),
                format!("disconnected {element}"),
            ]
        );
    }
}
