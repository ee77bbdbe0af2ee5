use colored::Colorize;
use std::fmt::{Formatter, Result, Write};

/// Writes values, property records and descriptors, either on one line
/// (`Compact`) or with their internal slots spelled out (`Debug`). Nesting
/// past `max_depth` falls back to the compact form.
pub struct Renderer<'b, 'c> {
    max_depth: usize,
    current_depth: usize,
    pub representation: Representation,
    pub formatter: &'b mut Formatter<'c>,
}

impl<'b, 'c> Renderer<'b, 'c> {
    pub fn compact(formatter: &'b mut Formatter<'c>) -> Self {
        Renderer {
            max_depth: 0,
            current_depth: 1,
            formatter,
            representation: Representation::Compact,
        }
    }

    pub fn debug(formatter: &'b mut Formatter<'c>, depth: usize) -> Self {
        Renderer {
            max_depth: depth,
            current_depth: 0,
            formatter,
            representation: Representation::Debug,
        }
    }

    pub fn render(&mut self, object: &dyn DebugRepresentation) -> Result {
        if self.current_depth >= self.max_depth {
            let representation = self.representation;
            self.representation = Representation::Compact;
            let result = object.render(self);
            self.representation = representation;

            return result;
        }

        self.current_depth += 1;
        let result = object.render(self);
        self.current_depth -= 1;

        result
    }

    pub fn is_debug(&self) -> bool {
        self.representation == Representation::Debug
    }

    #[inline]
    pub fn start_internal(&mut self, internal_type: &str) -> Result {
        write!(self.formatter, "{}{}{}", "[[".blue(), internal_type.blue(), "| ".blue())
    }

    #[inline]
    pub fn end_internal(&mut self) -> Result {
        write!(self.formatter, "{}", "]]".blue())
    }

    #[inline]
    pub fn internal_key(&mut self, key: &str) -> Result {
        write!(self.formatter, "{}: ", key.blue())
    }

    #[inline]
    pub fn key(&mut self, key: &str) -> Result {
        self.formatter.write_str(key)
    }

    #[inline]
    pub fn literal(&mut self, value: &str) -> Result {
        write!(self.formatter, "{}", value.bright_yellow())
    }

    #[inline]
    pub fn string_literal(&mut self, value: &str) -> Result {
        write!(self.formatter, "\"{}\"", value.bright_yellow())
    }

    #[inline]
    pub fn function(&mut self, name: &str) -> Result {
        write!(self.formatter, "{}", format!("[Function: {}]", name).green())
    }

    /// A member kind such as `field` or `method`, followed by a space.
    #[inline]
    pub fn kind(&mut self, kind: &str) -> Result {
        write!(self.formatter, "{} ", kind.magenta())
    }

    /// Attribute flags as `wec`, with `-` for each one that is unset.
    pub fn flags(&mut self, writable: bool, enumerable: bool, configurable: bool) -> Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };

        self.literal(&format!(
            "{}{}{}",
            flag(writable, 'w'),
            flag(enumerable, 'e'),
            flag(configurable, 'c')
        ))
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Representation {
    Compact,
    Debug,
}

pub trait DebugRepresentation {
    fn render(&self, renderer: &mut Renderer) -> Result;
}

impl<T> DebugRepresentation for Vec<T>
where
    T: DebugRepresentation,
{
    fn render(&self, renderer: &mut Renderer) -> Result {
        renderer.formatter.write_char('[')?;

        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                renderer.formatter.write_str(", ")?;
            }

            renderer.render(item)?;
        }

        renderer.formatter.write_char(']')
    }
}

impl<T> DebugRepresentation for Option<T>
where
    T: DebugRepresentation,
{
    fn render(&self, renderer: &mut Renderer) -> Result {
        match self {
            Some(value) => renderer.render(value),
            None => renderer.literal("null"),
        }
    }
}

impl DebugRepresentation for String {
    fn render(&self, renderer: &mut Renderer) -> Result {
        renderer.string_literal(self)
    }
}

/// Wraps anything renderable so it can be handed to `format!` and friends.
pub struct Rendered<'a, T> {
    value: &'a T,
    depth: usize,
}

pub fn rendered<T: DebugRepresentation>(value: &T, depth: usize) -> Rendered<'_, T> {
    Rendered { value, depth }
}

impl<'a, T: DebugRepresentation> std::fmt::Debug for Rendered<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Renderer::debug(f, self.depth).render(self.value)
    }
}

impl<'a, T: DebugRepresentation> std::fmt::Display for Rendered<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Renderer::compact(f).render(self.value)
    }
}
