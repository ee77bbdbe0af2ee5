use assert_matches::assert_matches;
use chrono::{Datelike, Utc};
use reflect_ex::{
    argument, DescriptorKind, ExecutionError, JsClass, JsObject, JsResult, MemberDescriptor,
    Realm, RuntimeValue,
};

const PERSON_SOURCE: &str = r"class Person {
    constructor(name, age) {
        this.name = name;
        this.age = age;
    }

    get birthYear() {
        return new Date().getUTCFullYear() - this.age;
    }

    doBirthday() {
        this.age++;
    }
}";

fn person_constructor(
    arguments: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    let this = target.as_object()?;
    this.define_value("name", argument(arguments, 0));
    this.define_value("age", argument(arguments, 1));
    Ok(None)
}

fn birth_year(
    _: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    let age = f64::from(reflect_ex::get(target.as_object()?, "age")?);
    let year = f64::from(Utc::now().year());

    Ok(Some((year - age).into()))
}

fn do_birthday(
    _: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    let this = target.as_object()?;
    let age = f64::from(reflect_ex::get(this, "age")?);
    reflect_ex::set(this, "age", age + 1.0)?;
    Ok(None)
}

fn person_class(realm: &Realm) -> JsObject {
    JsClass::new("Person", PERSON_SOURCE)
        .with_constructor(person_constructor)
        .with_getter(
            "birthYear",
            "get birthYear() {\n        return new Date().getUTCFullYear() - this.age;\n    }",
            birth_year,
        )
        .with_method(
            "doBirthday",
            "doBirthday() {\n        this.age++;\n    }",
            do_birthday,
        )
        .load(realm)
}

fn michael(realm: &Realm) -> JsObject {
    let person = person_class(realm);

    reflect_ex::construct(&person, &["Michael".into(), 46.into()]).expect("Person constructs")
}

#[test]
fn test_person_counts() {
    let realm = Realm::new();
    let michael = michael(&realm);

    assert_eq!(
        reflect_ex::get_own_field_descriptors(&michael).map(|d| d.len()).ok(),
        Some(2)
    );
    assert_eq!(
        reflect_ex::get_own_property_descriptors(&michael).map(|d| d.len()).ok(),
        Some(1)
    );
    assert_eq!(
        reflect_ex::get_own_method_descriptors(&michael).map(|d| d.len()).ok(),
        Some(1)
    );
}

#[test]
fn test_person_keys() {
    let realm = Realm::new();
    let michael = michael(&realm);

    assert_eq!(
        reflect_ex::get_own_keys(&michael, true).ok(),
        Some(
            ["name", "age", "constructor", "birthYear", "doBirthday"]
                .iter()
                .map(|key| (*key).to_owned())
                .collect()
        )
    );
    assert_eq!(
        reflect_ex::get_own_keys(&michael, false).ok(),
        Some(vec!["name".to_owned(), "age".to_owned()])
    );
}

#[test]
fn test_method_invocation_matches_direct_call() {
    let realm = Realm::new();
    let michael = michael(&realm);

    let methods = reflect_ex::get_own_method_descriptors(&michael).expect("methods");
    let do_birthday = &methods[0];

    assert_eq!(do_birthday.name(), "doBirthday");
    assert!(do_birthday.arguments().is_empty());

    do_birthday.invoke(&michael, &[]).expect("doBirthday runs");
    assert_eq!(reflect_ex::get(&michael, "age").ok(), Some(RuntimeValue::from(47)));

    let direct = reflect_ex::get(&michael, "doBirthday").expect("doBirthday resolves");
    reflect_ex::apply(direct.as_object().expect("function"), &(&michael).into(), &[])
        .expect("direct call runs");
    assert_eq!(reflect_ex::get(&michael, "age").ok(), Some(RuntimeValue::from(48)));
}

#[test]
fn test_getter_matches_direct_read() {
    let realm = Realm::new();
    let michael = michael(&realm);

    let properties = reflect_ex::get_own_property_descriptors(&michael).expect("properties");
    let birth_year = &properties[0];

    assert_eq!(birth_year.name(), "birthYear");
    assert!(birth_year.readable());
    assert!(!birth_year.writable());
    assert!(birth_year.setter().is_none());

    let getter = birth_year.getter().expect("birthYear has a getter");
    assert_eq!(getter.name(), "get birthYear");
    assert!(getter.arguments().is_empty());

    let through_descriptor = getter.invoke(&michael, &[]).expect("getter runs");
    let direct = reflect_ex::get(&michael, "birthYear").expect("direct read");

    assert_eq!(through_descriptor, direct);
    assert_eq!(
        direct,
        RuntimeValue::from(f64::from(Utc::now().year()) - 46.0)
    );
}

#[test]
fn test_name_field() {
    let realm = Realm::new();
    let michael = michael(&realm);

    let fields = reflect_ex::get_own_field_descriptors(&michael).expect("fields");

    assert_eq!(fields[0].name(), "name");
    assert_eq!(fields[0].value(), &RuntimeValue::from("Michael"));
    assert!(fields[0].writable() && fields[0].enumerable() && fields[0].configurable());
    assert_eq!(fields[1].value(), &RuntimeValue::from(46));
}

#[test]
fn test_constructor_descriptor() {
    let realm = Realm::new();
    let person = person_class(&realm);
    let michael = reflect_ex::construct(&person, &["Michael".into(), 46.into()]).expect("new");

    let constructor = reflect_ex::get_own_constructor_descriptor(&michael)
        .expect("introspects")
        .expect("constructor is present");

    assert_eq!(constructor.name(), "constructor");
    assert_eq!(constructor.function(), &person);
    assert_eq!(constructor.arguments(), ["name", "age"]);
    assert!(constructor.writable() && !constructor.enumerable());
}

#[test]
fn test_absent_name() {
    let realm = Realm::new();
    let michael = michael(&realm);

    assert_matches!(reflect_ex::get_own_descriptor(&michael, "doesNotExist"), Ok(None));
}

#[test]
fn test_descriptor_is_a_snapshot() {
    let realm = Realm::new();
    let michael = michael(&realm);

    let age = reflect_ex::get_own_descriptor(&michael, "age")
        .expect("introspects")
        .expect("age is present");
    reflect_ex::set(&michael, "age", 50).expect("set runs");

    assert_eq!(age.value(), &RuntimeValue::from(46));
}

#[test]
fn test_instance_field_shadows_prototype_accessor() {
    let realm = Realm::new();
    let michael = michael(&realm);

    reflect_ex::define_property(&michael, "birthYear", reflect_ex::Property::value(1980));

    assert_matches!(
        reflect_ex::get_own_descriptor(&michael, "birthYear"),
        Ok(Some(ref descriptor)) if descriptor.kind() == DescriptorKind::Field
    );

    // Listed once from the instance and once from the prototype, both times
    // resolved to the instance field.
    let keys = reflect_ex::get_own_keys(&michael, true).expect("keys");
    assert_eq!(keys.iter().filter(|key| *key == "birthYear").count(), 2);

    let descriptors = reflect_ex::get_own_descriptors(&michael, true).expect("descriptors");
    let birth_years: Vec<_> = descriptors
        .iter()
        .filter(|descriptor| descriptor.name() == "birthYear")
        .map(|descriptor| descriptor.kind())
        .collect();
    assert_eq!(birth_years, vec![DescriptorKind::Field, DescriptorKind::Field]);

    assert_eq!(
        reflect_ex::get_own_property_descriptors(&michael).map(|d| d.len()).ok(),
        Some(0)
    );
    assert_eq!(
        reflect_ex::get_own_field_descriptors(&michael).map(|d| d.len()).ok(),
        Some(4)
    );
}

#[test]
fn test_setter_forces_writable() {
    fn get_celsius(
        _: &[RuntimeValue],
        target: &RuntimeValue,
        _: Option<&RuntimeValue>,
    ) -> JsResult<Option<RuntimeValue>> {
        reflect_ex::get(target.as_object()?, "_celsius").map(Some)
    }

    fn set_celsius(
        arguments: &[RuntimeValue],
        target: &RuntimeValue,
        _: Option<&RuntimeValue>,
    ) -> JsResult<Option<RuntimeValue>> {
        target
            .as_object()?
            .define_value("_celsius", argument(arguments, 0));
        Ok(None)
    }

    let realm = Realm::new();
    // Setter declared ahead of its getter; both must end up on one accessor.
    let thermometer = JsClass::new("Thermometer", "class Thermometer {}")
        .with_setter(
            "celsius",
            "set celsius(value) { this._celsius = value; }",
            set_celsius,
        )
        .with_getter("celsius", "get celsius() { return this._celsius; }", get_celsius)
        .load(&realm);
    let instance = reflect_ex::construct(&thermometer, &[]).expect("new");

    let properties = reflect_ex::get_own_property_descriptors(&instance).expect("properties");
    assert_eq!(properties.len(), 1);

    let celsius = &properties[0];
    assert!(celsius.readable() && celsius.writable());

    assert_eq!(
        celsius.getter().map(|getter| getter.name().to_owned()),
        Some("get celsius".to_owned())
    );
    let setter = celsius.setter().expect("setter present");
    assert_eq!(setter.name(), "set celsius");
    assert_eq!(setter.arguments(), ["value"]);

    setter.invoke(&instance, &[21.into()]).expect("setter runs");
    assert_eq!(
        celsius.getter().map(|getter| getter.invoke(&instance, &[]).ok()),
        Some(Some(RuntimeValue::from(21)))
    );
    assert_eq!(reflect_ex::get(&instance, "celsius").ok(), Some(RuntimeValue::from(21)));
}

#[test]
fn test_method_parameters() {
    fn noop(
        _: &[RuntimeValue],
        _: &RuntimeValue,
        _: Option<&RuntimeValue>,
    ) -> JsResult<Option<RuntimeValue>> {
        Ok(None)
    }

    let realm = Realm::new();
    let calculator = JsClass::new("Calculator", "class Calculator {}")
        .with_method("add", "add(left, right) { return left + right; }", noop)
        .with_method("reset", "reset() {}", noop)
        .load(&realm);
    let instance = reflect_ex::construct(&calculator, &[]).expect("new");

    let methods = reflect_ex::get_own_method_descriptors(&instance).expect("methods");
    let arguments: Vec<_> = methods
        .iter()
        .map(|method| (method.name().to_owned(), method.arguments().to_vec()))
        .collect();

    assert_eq!(
        arguments,
        vec![
            ("add".to_owned(), vec!["left".to_owned(), "right".to_owned()]),
            ("reset".to_owned(), vec![]),
        ]
    );

    // The class text declares no constructor.
    let constructor = reflect_ex::get_own_constructor_descriptor(&instance)
        .expect("introspects")
        .expect("constructor present");
    assert!(constructor.arguments().is_empty());
}

#[test]
fn test_null_prototype_target() {
    let target = JsObject::new();

    assert_matches!(
        reflect_ex::get_own_descriptors(&target, true),
        Err(ExecutionError::TypeError(_))
    );
    assert_matches!(
        reflect_ex::get_own_method_descriptors(&target),
        Err(ExecutionError::TypeError(_))
    );
}

#[test]
fn test_descriptor_display() {
    colored::control::set_override(false);

    let realm = Realm::new();
    let michael = michael(&realm);

    let name = reflect_ex::get_own_descriptor(&michael, "name")
        .expect("introspects")
        .expect("name is present");
    let method = reflect_ex::get_own_descriptor(&michael, "doBirthday")
        .expect("introspects")
        .expect("doBirthday is present");

    assert_eq!(format!("{}", name), "field name = \"Michael\"");
    assert_eq!(format!("{}", method), "method doBirthday()");
}
