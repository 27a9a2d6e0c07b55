//! Textual rendering of forms.
//!
//! Enclosures are drawn with one of several bracket families, juxtaposition is plain adjacency,
//! and void renders as the empty string (or `\emptyset` in LaTeX).

use std::fmt;

use crate::form::Form;

/// Rendering style for [`Form::render`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Style {
    /// `⟨⟨⟩⟩`
    #[default]
    Angle,
    /// `(())`
    Paren,
    /// `[[]]`
    Square,
    /// `\langle \langle \rangle \rangle`
    Latex,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Angle, Style::Paren, Style::Square, Style::Latex];

    /// Opening and closing delimiters of an enclosure.
    pub fn brackets(self) -> (&'static str, &'static str) {
        match self {
            Style::Angle => ("⟨", "⟩"),
            Style::Paren => ("(", ")"),
            Style::Square => ("[", "]"),
            Style::Latex => ("\\langle", "\\rangle"),
        }
    }

    fn write_form(self, form: &Form, out: &mut impl fmt::Write) -> fmt::Result {
        match self {
            Style::Latex => write_latex(form, out),
            _ => {
                let (open, close) = self.brackets();
                write_brackets(form, open, close, "", out)
            }
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Angle => "angle",
            Style::Paren => "paren",
            Style::Square => "square",
            Style::Latex => "latex",
        };
        f.write_str(name)
    }
}

fn write_brackets(form: &Form, open: &str, close: &str, void: &str, out: &mut impl fmt::Write) -> fmt::Result {
    if form.is_void() {
        return out.write_str(void);
    }
    if form.is_marked() {
        out.write_str(open)?;
    }
    for child in form.contents() {
        write_brackets(child, open, close, void, out)?;
    }
    if form.is_marked() {
        out.write_str(close)?;
    }
    Ok(())
}

fn write_latex(form: &Form, out: &mut impl fmt::Write) -> fmt::Result {
    if form.is_void() {
        return out.write_str("\\emptyset");
    }
    if form.is_marked() {
        out.write_str("\\langle ")?;
    }
    for (i, child) in form.contents().iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write_latex(child, out)?;
    }
    if form.is_marked() {
        if !form.contents().is_empty() {
            out.write_char(' ')?;
        }
        out.write_str("\\rangle")?;
    }
    Ok(())
}

impl Form {
    /// Render this form in the given style.
    pub fn render(&self, style: Style) -> String {
        let mut s = String::new();
        // Writing into a String never fails.
        let _ = style.write_form(self, &mut s);
        s
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Style::Angle.write_form(self, f)
    }
}

/// Display adapter writing void as `∅` wherever it occurs, see [`Form::explicit`].
#[derive(Debug, Copy, Clone)]
pub struct Explicit<'a> {
    form: &'a Form,
    style: Style,
}

impl Explicit<'_> {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl fmt::Display for Explicit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            Style::Latex => write_latex(self.form, f),
            style => {
                let (open, close) = style.brackets();
                write_brackets(self.form, open, close, "∅", f)
            }
        }
    }
}

impl Form {
    /// Render without losing void.
    ///
    /// Plain bracket notation cannot show a void item (`⟨⟨⟩ ∅⟩` would print as `⟨⟨⟩⟩`),
    /// so traces and diagnostics use this form instead.
    pub fn explicit(&self) -> Explicit<'_> {
        Explicit {
            form: self,
            style: Style::Angle,
        }
    }
}
