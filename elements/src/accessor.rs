//! The get/set pair every bound property is read and written through.

use dom::{Dom, DomException, NodeId};

use crate::metadata::{AttributeBinding, PropertyType};
use crate::value::Value;

pub fn get(dom: &Dom, element: NodeId, binding: &AttributeBinding) -> Value {
    match binding.ty {
        PropertyType::Boolean => Value::Bool(dom.has_attribute(element, &binding.attribute)),
        _ => dom
            .get_attribute(element, &binding.attribute)
            .map_or(Value::Null, Value::from),
    }
}

pub fn set(
    dom: &mut Dom,
    element: NodeId,
    binding: &AttributeBinding,
    value: Value,
) -> Result<(), DomException> {
    if value.is_null() {
        return dom.remove_attribute(element, &binding.attribute);
    }

    match binding.ty {
        PropertyType::Boolean if value.is_truthy() => {
            dom.set_attribute(element, &binding.attribute, "")
        }
        PropertyType::Boolean => dom.remove_attribute(element, &binding.attribute),
        _ => dom.set_attribute(element, &binding.attribute, &value.to_attribute_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(attribute: &str, ty: PropertyType) -> AttributeBinding {
        AttributeBinding {
            attribute: attribute.to_string(),
            ty,
        }
    }

    #[test]
    fn string_properties_round_trip_through_the_attribute() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let element = dom.create_element(document, "div").unwrap();
        let direction = binding("direction", PropertyType::String);

        assert_eq!(get(&dom, element, &direction), Value::Null);
        set(&mut dom, element, &direction, "x".into()).unwrap();
        assert_eq!(dom.get_attribute(element, "direction"), Some("x"));
        assert_eq!(get(&dom, element, &direction), Value::from("x"));

        set(&mut dom, element, &direction, Value::Null).unwrap();
        assert!(!dom.has_attribute(element, "direction"));
        assert_eq!(get(&dom, element, &direction), Value::Null);
    }

    #[test]
    fn numbers_are_stored_as_strings() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let element = dom.create_element(document, "div").unwrap();
        let width = binding("width", PropertyType::Number);

        set(&mut dom, element, &width, 120.into()).unwrap();
        assert_eq!(dom.get_attribute(element, "width"), Some("120"));
        assert_eq!(get(&dom, element, &width), Value::from("120"));
    }

    #[test]
    fn boolean_properties_reflect_presence() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let element = dom.create_element(document, "div").unwrap();
        let open = binding("open", PropertyType::Boolean);

        assert_eq!(get(&dom, element, &open), Value::Bool(false));
        set(&mut dom, element, &open, true.into()).unwrap();
        assert_eq!(dom.get_attribute(element, "open"), Some(""));
        assert_eq!(get(&dom, element, &open), Value::Bool(true));

        set(&mut dom, element, &open, false.into()).unwrap();
        assert!(!dom.has_attribute(element, "open"));

        set(&mut dom, element, &open, "yes".into()).unwrap();
        assert_eq!(get(&dom, element, &open), Value::Bool(true));
        set(&mut dom, element, &open, Value::Null).unwrap();
        assert_eq!(get(&dom, element, &open), Value::Bool(false));
    }

    #[test]
    fn invalid_attribute_names_fail_on_write() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let element = dom.create_element(document, "div").unwrap();
        let broken = binding("bad name", PropertyType::String);

        assert_eq!(
            set(&mut dom, element, &broken, "x".into()),
            Err(DomException::InvalidCharacterError)
        );
    }
}
