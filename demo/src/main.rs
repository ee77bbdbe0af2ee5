extern crate anyhow;
extern crate colored;
extern crate log;

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Utc};
use clap::{App, Arg};
use colored::Colorize;
use log::info;
use reflect_ex::{argument, JsClass, JsObject, JsResult, MemberDescriptor, Realm, RuntimeValue};

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

    Ok(Some((f64::from(Utc::now().year()) - age).into()))
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

fn main() -> Result<()> {
    let matches = App::new("reflect_ex_demo")
        .about("Introspects a Person instance and exercises its descriptors")
        .arg(
            Arg::with_name("name")
                .help("Name passed to the Person constructor")
                .default_value("Michael")
                .index(1),
        )
        .arg(
            Arg::with_name("age")
                .help("Age passed to the Person constructor")
                .default_value("46")
                .index(2),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log classification at trace level"),
        )
        .arg(
            Arg::with_name("no-color")
                .long("no-color")
                .help("Disable colored output"),
        )
        .get_matches();

    let default_level = if matches.is_present("verbose") {
        "trace"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if matches.is_present("no-color") {
        colored::control::set_override(false);
    }

    let name = matches.value_of("name").unwrap_or("Michael");
    let age: f64 = matches
        .value_of("age")
        .unwrap_or("46")
        .parse()
        .context("age must be a number")?;

    let realm = Realm::new();
    let person = person_class(&realm);
    let michael = reflect_ex::construct(&person, &[name.into(), age.into()])?;

    info!("constructed {:?}", michael);

    println!("{}", "Descriptors".bold());
    for descriptor in reflect_ex::get_own_descriptors(&michael, true)? {
        println!("  {:?}", descriptor);
    }

    let methods = reflect_ex::get_own_method_descriptors(&michael)?;
    let fields = reflect_ex::get_own_field_descriptors(&michael)?;
    let properties = reflect_ex::get_own_property_descriptors(&michael)?;

    println!("{:?}", michael);

    let do_birthday = methods
        .first()
        .ok_or_else(|| anyhow!("Person has no methods"))?;
    do_birthday.invoke(&michael, &[])?;

    println!("{:?}", michael);

    let getter = properties
        .first()
        .and_then(|property| property.getter())
        .ok_or_else(|| anyhow!("Person has no readable property"))?;
    println!("{}", getter.invoke(&michael, &[])?);

    let field = fields
        .first()
        .ok_or_else(|| anyhow!("Person has no fields"))?;
    println!("{}", field.value());

    if let Some(constructor) = reflect_ex::get_own_constructor_descriptor(&michael)? {
        println!(
            "{} {}({})",
            "new".dimmed(),
            person.name().map(|name| name.to_string()).unwrap_or_default(),
            constructor.arguments().join(", ")
        );
    }

    Ok(())
}
