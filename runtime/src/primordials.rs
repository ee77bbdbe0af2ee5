use std::cell::RefCell;

use log::debug;

use crate::builtins::{function, objects};
use crate::values::function::{BuiltIn, BuiltinFn};
use crate::values::object::{JsObject, WeakJsObject};
use crate::values::string::JsPrimitiveString;

/// The intrinsic objects every other object hangs off: `Object`,
/// `Object.prototype`, `Function` and `Function.prototype`, wired with the
/// usual `prototype` / `constructor` links.
///
/// The realm owns everything it creates, classes loaded into it included.
/// Dropping it empties those objects so their reference cycles are freed;
/// handles that outlive the realm see objects with no properties.
pub struct Realm {
    pub(crate) object_prototype: JsObject,
    pub(crate) function_prototype: JsObject,
    pub(crate) object_constructor: JsObject,
    pub(crate) function_constructor: JsObject,
    objects: RefCell<Vec<WeakJsObject>>,
}

impl Default for Realm {
    fn default() -> Self {
        Realm::new()
    }
}

impl Realm {
    pub fn new() -> Realm {
        let object_prototype = JsObject::builder().with_name("Object").build();
        let function_prototype = JsObject::builder()
            .with_prototype(object_prototype.clone())
            .with_callable(BuiltIn::new(function::empty))
            .with_name("")
            .build();

        let object_constructor = JsObject::builder()
            .with_prototype(function_prototype.clone())
            .with_name("Object")
            .with_callable(BuiltIn::new(objects::call_object))
            .with_construct(BuiltIn::new(objects::construct_object))
            .build();
        let function_constructor = JsObject::builder()
            .with_prototype(function_prototype.clone())
            .with_name("Function")
            .with_callable(BuiltIn::new(function::construct_function))
            .with_construct(BuiltIn::new(function::construct_function))
            .build();

        let realm = Realm {
            object_prototype,
            function_prototype,
            object_constructor,
            function_constructor,
            objects: RefCell::new(Vec::new()),
        };

        realm.track(&realm.object_prototype);
        realm.track(&realm.function_prototype);
        realm.track(&realm.object_constructor);
        realm.track(&realm.function_constructor);

        link_constructor(&realm.object_constructor, &realm.object_prototype);
        link_constructor(&realm.function_constructor, &realm.function_prototype);

        objects::bind(&realm);
        function::bind(&realm);

        realm
    }

    pub fn object_prototype(&self) -> &JsObject {
        &self.object_prototype
    }

    pub fn function_prototype(&self) -> &JsObject {
        &self.function_prototype
    }

    pub fn object_constructor(&self) -> &JsObject {
        &self.object_constructor
    }

    pub fn function_constructor(&self) -> &JsObject {
        &self.function_constructor
    }

    /// Hands `object` to the realm, which empties it when dropped.
    pub(crate) fn track(&self, object: &JsObject) {
        let mut objects = self.objects.borrow_mut();

        if objects.len() == objects.capacity() {
            objects.retain(WeakJsObject::is_alive);
        }

        objects.push(object.downgrade());
    }

    /// `{}`
    pub fn new_object(&self) -> JsObject {
        let object = JsObject::builder()
            .with_prototype(self.object_prototype.clone())
            .build();

        self.track(&object);
        object
    }

    /// `Object.create(null)`
    pub fn new_object_without_prototype(&self) -> JsObject {
        let object = JsObject::new();

        self.track(&object);
        object
    }

    /// A callable, non-constructible function object.
    pub fn new_function(
        &self,
        name: impl Into<JsPrimitiveString>,
        source: Option<JsPrimitiveString>,
        function: BuiltIn,
    ) -> JsObject {
        let builder = JsObject::builder()
            .with_prototype(self.function_prototype.clone())
            .with_name(name)
            .with_callable(function);

        let function = match source {
            Some(source) => builder.with_source(source),
            None => builder,
        }
        .build();

        self.track(&function);
        function
    }

    pub fn new_native_function(&self, name: impl Into<JsPrimitiveString>, op: BuiltinFn) -> JsObject {
        self.new_function(name, None, BuiltIn::new(op))
    }

    /// Installs a native method the way built-ins are installed: writable,
    /// configurable and not enumerable.
    pub(crate) fn define_native_method(&self, target: &JsObject, name: &str, op: BuiltinFn) {
        let function = self.new_native_function(name, op);

        target.define_value_property(name, function, true, false, true);
    }
}

impl Drop for Realm {
    fn drop(&mut self) {
        let objects = std::mem::take(self.objects.get_mut());
        let mut released = 0;

        for object in objects.iter().filter_map(WeakJsObject::upgrade) {
            object.release();
            released += 1;
        }

        debug!("dropped realm, released {} objects", released);
    }
}

fn link_constructor(constructor: &JsObject, prototype: &JsObject) {
    constructor.define_value_property("prototype", prototype, false, false, false);
    prototype.define_value_property("constructor", constructor, true, false, true);
}
