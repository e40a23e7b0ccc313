//! Headless document model and view helpers
//!
//! The page is a tree of [`Element`]s addressed by `#id` selectors. Flows
//! mutate it the way a browser script mutates the DOM, and the CLI prints the
//! visible part of it through the [`fmt::Display`] impl.

use serde_json::Value;
use std::fmt;

/// Shown wherever a value is unknown or a list is empty.
pub const PLACEHOLDER: &str = "—";

pub const HIDDEN_CLASS: &str = "hidden";
pub const OK_CLASS: &str = "ok";
pub const ERR_CLASS: &str = "err";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Form field; holds a value, never printed.
    Input,
    /// Titled container.
    Section,
    /// Single line of text.
    Text,
    /// Container whose children are list entries.
    List,
    /// Entry inside a list or grid.
    Entry,
}

/// What happens when an element is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Load nutrient details for the given source identifier.
    FoodDetails(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub label: String,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub children: Vec<Element>,
    pub on_click: Option<ClickAction>,
    classes: Vec<String>,
}

impl Element {
    pub fn new(id: &str, kind: ElementKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: String::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            children: Vec::new(),
            on_click: None,
            classes: Vec::new(),
        }
    }

    pub fn entry(text: impl Into<String>) -> Self {
        let mut el = Self::new("", ElementKind::Entry);
        el.text = text.into();
        el
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replaces the whole class list from a space separated string.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes.clear();
        for class in class_name.split_whitespace() {
            self.add_class(class);
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS)
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if self.is_hidden() || self.kind == ElementKind::Input {
            return Ok(());
        }
        let indent = "  ".repeat(depth);
        match self.kind {
            ElementKind::Section => writeln!(f, "{}== {} ==", indent, self.label)?,
            ElementKind::Entry => writeln!(f, "{}- {}", indent, self.text)?,
            ElementKind::List if !self.label.is_empty() => writeln!(f, "{}{}", indent, self.label)?,
            ElementKind::Text if self.text.is_empty() => {}
            ElementKind::Text if self.label.is_empty() => writeln!(f, "{}{}", indent, self.text)?,
            ElementKind::Text => writeln!(f, "{}{}: {}", indent, self.label, self.text)?,
            _ => {}
        }
        let child_depth = match self.kind {
            ElementKind::Section => depth,
            _ => depth + 1,
        };
        for child in &self.children {
            child.write_tree(f, child_depth)?;
        }
        Ok(())
    }
}

/// The whole page: an ordered forest of elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    roots: Vec<Element>,
}

impl Document {
    pub fn new(roots: Vec<Element>) -> Self {
        Self { roots }
    }

    /// Standard layout of the diet planner page. Output regions start hidden.
    pub fn page() -> Self {
        use ElementKind::*;

        let input = |id: &str| Element::new(id, Input);
        let text = |id: &str, label: &str| Element::new(id, Text).with_label(label);
        let list = |id: &str, label: &str| Element::new(id, List).with_label(label);

        let diet_form = Element::new("dietForm", Section)
            .with_label("Diet plan")
            .with_children(vec![
                input("age"),
                input("height_cm"),
                input("weight_kg"),
                input("gender"),
                input("activity_level"),
                input("goal"),
                input("preferences"),
                text("dietStatus", "Status"),
            ]);

        let diet_summary = Element::new("dietSummary", Section)
            .with_label("Summary")
            .with_class(HIDDEN_CLASS)
            .with_children(vec![
                text("bmiValue", "BMI"),
                text("bmiTag", "Category").with_class("mini-sub"),
                text("calValue", "Daily calories"),
                text("proValue", "Protein (g)"),
                text("goalValue", "Goal"),
                text("tdeeLine", "Energy"),
            ]);

        let diet_actions = Element::new("dietActions", Section)
            .with_label("Actions")
            .with_class(HIDDEN_CLASS)
            .with_children(vec![
                Element::entry("Copy plan (--copy)"),
                Element::entry("Download JSON (--download)"),
            ]);

        let meal_sections = Element::new("mealSections", Section)
            .with_label("Meals")
            .with_class(HIDDEN_CLASS)
            .with_children(vec![
                list("mealBreakfast", "Breakfast"),
                list("mealLunch", "Lunch"),
                list("mealDinner", "Dinner"),
                list("mealSnacks", "Snacks"),
                list("mealHydration", "Hydration"),
                list("mealNotes", "Notes"),
            ]);

        let raw_block = Element::new("rawBlock", Section)
            .with_label("Raw response")
            .with_class(HIDDEN_CLASS)
            .with_children(vec![text("dietRaw", "")]);

        let food_form = Element::new("foodForm", Section)
            .with_label("Food search")
            .with_children(vec![
                input("foodQuery"),
                input("pageSize").with_value("5"),
                input("commonOnly"),
                text("foodStatus", "Status"),
                list("foodResults", ""),
            ]);

        let food_details = Element::new("foodDetails", Section)
            .with_label("Nutrients")
            .with_children(vec![
                text("foodTitle", ""),
                list("nutriGrid", ""),
                text("foodDetailsRaw", "").with_class(HIDDEN_CLASS),
            ]);

        Self::new(vec![
            diet_form,
            diet_summary,
            diet_actions,
            meal_sections,
            raw_block,
            food_form,
            food_details,
        ])
    }

    /// First element matching an `#id` selector. Other selector forms match
    /// nothing.
    pub fn select_one(&mut self, selector: &str) -> Option<&mut Element> {
        let id = selector.strip_prefix('#')?;
        find_mut(&mut self.roots, id)
    }

    pub fn select(&self, selector: &str) -> Option<&Element> {
        let id = selector.strip_prefix('#')?;
        find(&self.roots, id)
    }

    /// Text of the element, or an empty string when it does not exist.
    pub fn text_of(&self, selector: &str) -> &str {
        self.select(selector).map(|el| el.text.as_str()).unwrap_or("")
    }

    /// Input value of the element, or an empty string when it does not exist.
    pub fn value_of(&self, selector: &str) -> &str {
        self.select(selector).map(|el| el.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, selector: &str, value: &str) {
        if let Some(el) = self.select_one(selector) {
            el.value = value.to_string();
        }
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) {
        if let Some(el) = self.select_one(selector) {
            el.checked = checked;
        }
    }

    pub fn is_visible(&self, selector: &str) -> bool {
        self.select(selector).is_some_and(|el| !el.is_hidden())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in &self.roots {
            root.write_tree(f, 0)?;
        }
        Ok(())
    }
}

fn find<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    for el in elements {
        if el.id == id {
            return Some(el);
        }
        if let Some(found) = find(&el.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(elements: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    for el in elements.iter_mut() {
        if el.id == id {
            return Some(el);
        }
        if let Some(found) = find_mut(&mut el.children, id) {
            return Some(found);
        }
    }
    None
}

/// Sets the status text and exactly one of `ok`/`err`, or neither when the
/// message is empty.
pub fn set_status(element: Option<&mut Element>, message: &str, ok: bool) {
    let Some(el) = element else {
        return;
    };
    el.set_text(message);
    el.remove_class(OK_CLASS);
    el.remove_class(ERR_CLASS);
    if !message.is_empty() {
        el.add_class(if ok { OK_CLASS } else { ERR_CLASS });
    }
}

pub fn toggle_visible(element: Option<&mut Element>, visible: bool) {
    let Some(el) = element else {
        return;
    };
    if visible {
        el.remove_class(HIDDEN_CLASS);
    } else {
        el.add_class(HIDDEN_CLASS);
    }
}

/// Finite number from an untrusted JSON field.
///
/// Numbers pass through when finite, strings are trimmed and parsed, and
/// everything else (including missing fields and empty strings) is `None`.
pub fn coerce_finite_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Same rules as [`coerce_finite_number`] for raw form input.
pub fn parse_finite(input: &str) -> Option<f64> {
    coerce_finite_number(Some(&Value::String(input.to_string())))
}

/// Items of a JSON array rendered as display strings; `None` for anything
/// that is not an array.
pub fn json_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(items.iter().map(display_value).collect())
}

/// Nearest whole number as text. Works on the `f64` directly so magnitudes
/// past the integer range keep their digits; negative zero prints as `0`.
pub fn format_whole(value: f64) -> String {
    format!("{:.0}", value.round() + 0.0)
}

/// Text form of a JSON scalar: strings verbatim, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replaces the children of `element` with one entry per item, or a single
/// placeholder entry when there is nothing to show.
pub fn render_list<S: AsRef<str>>(element: Option<&mut Element>, items: Option<&[S]>) {
    let Some(el) = element else {
        return;
    };
    el.clear_children();
    match items {
        Some(items) if !items.is_empty() => {
            for item in items {
                el.push_child(Element::entry(item.as_ref()));
            }
        }
        _ => el.push_child(Element::entry(PLACEHOLDER)),
    }
}
