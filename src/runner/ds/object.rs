use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object_property::{is_array_index, PropertyKey};
use crate::runner::ds::value::{JsNumberType, JsValue};

pub type JsObjectType = Rc<RefCell<ObjectType>>;

pub const LENGTH_PROPERTY: &str = "length";

pub enum ObjectType {
    Ordinary(OrdinaryObject),
    Function(FunctionObject),
    Array(ArrayObject),
}
impl ObjectType {
    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectType::Function(_))
    }

    pub fn as_js_object(&self) -> &dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Array(o) => o,
        }
    }

    pub fn as_js_object_mut(&mut self) -> &mut dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Array(o) => o,
        }
    }

    pub fn as_function_object(&self) -> Option<&FunctionObject> {
        match self {
            ObjectType::Function(f) => Some(f),
            _ => None,
        }
    }
}

/// Own properties in insertion order plus the single parent reference.
pub struct ObjectBase {
    properties: HashMap<PropertyKey, JsValue>,
    keys: Vec<PropertyKey>,
    prototype: Option<JsObjectType>,
}
impl ObjectBase {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        ObjectBase {
            properties: HashMap::new(),
            keys: Vec::new(),
            prototype,
        }
    }
}

pub trait JsObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn get_object_base(&self) -> &ObjectBase;

    fn class_name(&self) -> &'static str {
        "Object"
    }

    fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.get_object_base().prototype.clone()
    }

    /// Replaces the parent reference. Cycle detection needs the owning
    /// `Rc`, so it lives in `operations::object::set_parent`.
    fn set_prototype_of(&mut self, prototype: Option<JsObjectType>) {
        self.get_object_base_mut().prototype = prototype;
    }

    fn get_own_property(&self, property: &str) -> Option<&JsValue> {
        self.get_object_base().properties.get(property)
    }

    fn has_own_property(&self, property: &str) -> bool {
        self.get_object_base().properties.contains_key(property)
    }

    fn define_own_property(&mut self, property: PropertyKey, value: JsValue) {
        let base = self.get_object_base_mut();
        if !base.properties.contains_key(&property) {
            base.keys.push(property.clone());
        }
        base.properties.insert(property, value);
    }

    fn delete_own_property(&mut self, property: &str) -> bool {
        let base = self.get_object_base_mut();
        if base.properties.remove(property).is_some() {
            base.keys.retain(|k| k != property);
            true
        } else {
            false
        }
    }

    fn own_keys(&self) -> Vec<PropertyKey> {
        self.get_object_base().keys.clone()
    }
}

pub struct OrdinaryObject {
    object_base: ObjectBase,
}
impl OrdinaryObject {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        OrdinaryObject {
            object_base: ObjectBase::new(prototype),
        }
    }
}
impl JsObject for OrdinaryObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }
}

/// Elements live in index-named own properties; `length` tracks the
/// highest index written plus one.
pub struct ArrayObject {
    object_base: ObjectBase,
}
impl ArrayObject {
    pub fn new(prototype: Option<JsObjectType>, elements: Vec<JsValue>) -> Self {
        let mut array = ArrayObject {
            object_base: ObjectBase::new(prototype),
        };
        array.define_own_property(
            LENGTH_PROPERTY.to_string(),
            JsValue::Number(JsNumberType::Integer(0)),
        );
        for (i, v) in elements.into_iter().enumerate() {
            array.define_own_property(i.to_string(), v);
        }
        array
    }

    pub fn length(&self) -> usize {
        match self.get_own_property(LENGTH_PROPERTY) {
            Some(JsValue::Number(JsNumberType::Integer(n))) => usize::try_from(*n).unwrap_or(0),
            _ => 0,
        }
    }

    pub fn elements(&self) -> Vec<JsValue> {
        (0..self.length())
            .map(|i| {
                self.get_own_property(&i.to_string())
                    .cloned()
                    .unwrap_or(JsValue::Undefined)
            })
            .collect()
    }
}
impl JsObject for ArrayObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn class_name(&self) -> &'static str {
        "Array"
    }

    fn define_own_property(&mut self, property: PropertyKey, value: JsValue) {
        if let Some(index) = is_array_index(&property) {
            let next_length = index.checked_add(1).and_then(|n| i64::try_from(n).ok());
            if let Some(next_length) = next_length {
                if index >= self.length() {
                    let base = self.get_object_base_mut();
                    base.properties.insert(
                        LENGTH_PROPERTY.to_string(),
                        JsValue::Number(JsNumberType::Integer(next_length)),
                    );
                }
            }
        }
        let base = self.get_object_base_mut();
        if !base.properties.contains_key(&property) {
            base.keys.push(property.clone());
        }
        base.properties.insert(property, value);
    }
}

pub fn object_create(prototype: Option<JsObjectType>) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Ordinary(OrdinaryObject::new(
        prototype,
    ))))
}

pub fn array_create(prototype: Option<JsObjectType>, elements: Vec<JsValue>) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Array(ArrayObject::new(
        prototype, elements,
    ))))
}
