//! Scripted in-memory store page implementing `PageDriver`.
//!
//! Menu items become visible once the scroll offset reaches their
//! `reveal_at`; clicking one opens its modal, whose groups and options are
//! served to the detail selectors until the close button is clicked.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use menuscrape_core::{Selector, Selectors};
use menuscrape_scraper::{DriverError, PageDriver};

#[derive(Debug, Clone, Default)]
pub struct FakeGroup {
    pub name: String,
    pub labels: Vec<String>,
    /// `(name, price label)`.
    pub options: Vec<(String, Option<String>)>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeItem {
    /// Text rendered on the menu card.
    pub text: String,
    /// Name shown in the modal heading.
    pub name: String,
    pub reveal_at: f64,
    pub groups: Vec<FakeGroup>,
    pub fail_click: bool,
    pub modal_never_opens: bool,
}

impl FakeItem {
    pub fn new(name: &str, price: &str) -> Self {
        Self {
            text: format!("{name}\n{price}"),
            name: name.to_owned(),
            ..Self::default()
        }
    }

    pub fn revealed_at(mut self, offset: f64) -> Self {
        self.reveal_at = offset;
        self
    }

    pub fn with_group(mut self, group: FakeGroup) -> Self {
        self.groups.push(group);
        self
    }
}

pub fn group(name: &str, limit_label: &str, options: &[(&str, Option<&str>)]) -> FakeGroup {
    FakeGroup {
        name: name.to_owned(),
        labels: vec!["Required".to_owned(), limit_label.to_owned()],
        options: options
            .iter()
            .map(|(n, p)| ((*n).to_owned(), p.map(str::to_owned)))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum El {
    Payload,
    Tab(usize),
    Item(usize),
    Modal,
    ModalName,
    Close,
    Group(usize),
    GroupName(usize),
    GroupLabel(usize, usize),
    Option(usize, usize),
    OptionName(usize, usize),
    OptionPrice(usize, usize),
}

#[derive(Debug, Default)]
struct State {
    items: Vec<FakeItem>,
    tabs: Vec<String>,
    payload: Option<String>,
    offset: f64,
    max_offset: f64,
    open: Option<usize>,
    clicks: Vec<String>,
}

pub struct FakePage {
    selectors: Selectors,
    state: Mutex<State>,
}

impl FakePage {
    pub fn new(items: Vec<FakeItem>, max_offset: f64) -> Self {
        Self {
            selectors: Selectors::default(),
            state: Mutex::new(State {
                items,
                max_offset,
                ..State::default()
            }),
        }
    }

    pub fn with_payload(self, script_text: &str) -> Self {
        self.state.lock().unwrap().payload = Some(script_text.to_owned());
        self
    }

    pub fn with_tabs(self, tabs: &[&str]) -> Self {
        self.state.lock().unwrap().tabs = tabs.iter().map(|t| (*t).to_owned()).collect();
        self
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    /// Visible texts of every item click that went through, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn offset(&self) -> f64 {
        self.state.lock().unwrap().offset
    }

    fn open_item<'a>(&self, state: &'a State) -> Option<&'a FakeItem> {
        state.open.map(|i| &state.items[i])
    }

    fn missing(selector: &Selector) -> DriverError {
        DriverError::NoSuchElement {
            selector: selector.to_string(),
        }
    }
}

#[async_trait]
impl PageDriver for FakePage {
    type Element = El;

    async fn find_element(&self, selector: &Selector) -> Result<Option<El>, DriverError> {
        let s = &self.selectors;
        let state = self.state.lock().unwrap();
        let found = if selector == &s.payload_script {
            state.payload.as_ref().map(|_| El::Payload)
        } else if selector == &s.item_modal {
            state.open.map(|_| El::Modal)
        } else if selector == &s.item_modal_name {
            state.open.map(|_| El::ModalName)
        } else if selector == &s.modal_close {
            state.open.map(|_| El::Close)
        } else if selector == &s.menu_nav_tabs {
            (!state.tabs.is_empty()).then_some(El::Tab(0))
        } else if selector == &s.menu_item {
            state
                .items
                .iter()
                .position(|item| item.reveal_at <= state.offset)
                .map(El::Item)
        } else {
            None
        };
        Ok(found)
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<El>, DriverError> {
        let s = &self.selectors;
        let state = self.state.lock().unwrap();
        let found = if selector == &s.menu_item {
            state
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.reveal_at <= state.offset)
                .map(|(i, _)| El::Item(i))
                .collect()
        } else if selector == &s.detail_group {
            self.open_item(&state)
                .map(|item| (0..item.groups.len()).map(El::Group).collect())
                .unwrap_or_default()
        } else if selector == &s.menu_nav_tabs {
            (0..state.tabs.len()).map(El::Tab).collect()
        } else {
            Vec::new()
        };
        Ok(found)
    }

    async fn find_within(&self, parent: &El, selector: &Selector) -> Result<Vec<El>, DriverError> {
        let s = &self.selectors;
        let state = self.state.lock().unwrap();
        let Some(item) = self.open_item(&state) else {
            return Ok(Vec::new());
        };
        let found = match parent {
            El::Group(g) if selector == &s.detail_group_name => vec![El::GroupName(*g)],
            El::Group(g) if selector == &s.detail_group_labels => (0..item.groups[*g]
                .labels
                .len())
                .map(|i| El::GroupLabel(*g, i))
                .collect(),
            El::Group(g) if selector == &s.option => (0..item.groups[*g].options.len())
                .map(|o| El::Option(*g, o))
                .collect(),
            El::Option(g, o) if selector == &s.option_name => vec![El::OptionName(*g, *o)],
            El::Option(g, o) if selector == &s.option_price => {
                if item.groups[*g].options[*o].1.is_some() {
                    vec![El::OptionPrice(*g, *o)]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        };
        Ok(found)
    }

    async fn click(&self, element: &El) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        match element {
            El::Item(i) => {
                let item = state.items[*i].clone();
                if item.fail_click {
                    return Err(DriverError::command("click", "element click intercepted"));
                }
                state.clicks.push(item.text);
                if !item.modal_never_opens {
                    state.open = Some(*i);
                }
                Ok(())
            }
            El::Close => {
                state.open = None;
                Ok(())
            }
            other => Err(DriverError::command("click", format!("{other:?} is not clickable"))),
        }
    }

    async fn read_text(&self, element: &El) -> Result<String, DriverError> {
        let state = self.state.lock().unwrap();
        let open = self.open_item(&state);
        let text = match (element, open) {
            (El::Item(i), _) => state.items[*i].text.clone(),
            (El::ModalName, Some(item)) => item.name.clone(),
            (El::GroupName(g), Some(item)) => item.groups[*g].name.clone(),
            (El::GroupLabel(g, i), Some(item)) => item.groups[*g].labels[*i].clone(),
            (El::OptionName(g, o), Some(item)) => item.groups[*g].options[*o].0.clone(),
            (El::OptionPrice(g, o), Some(item)) => {
                item.groups[*g].options[*o].1.clone().unwrap_or_default()
            }
            (other, _) => return Err(Self::missing(&Selector::css(&format!("{other:?}")))),
        };
        Ok(text)
    }

    async fn read_attribute(
        &self,
        element: &El,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let state = self.state.lock().unwrap();
        Ok(match (element, name) {
            (El::Payload, "textContent") => state.payload.clone(),
            (El::Tab(i), "aria-label") => state.tabs.get(*i).cloned(),
            _ => None,
        })
    }

    async fn is_displayed(&self, element: &El) -> Result<bool, DriverError> {
        let state = self.state.lock().unwrap();
        Ok(match element {
            El::Modal => state.open.is_some(),
            El::Item(i) => state.items[*i].reveal_at <= state.offset,
            _ => true,
        })
    }

    async fn is_enabled(&self, _element: &El) -> Result<bool, DriverError> {
        Ok(true)
    }

    async fn scroll_by(&self, _dx: i64, dy: i64) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        #[allow(clippy::cast_precision_loss)]
        let next = state.offset + dy as f64;
        state.offset = next.clamp(0.0, state.max_offset);
        Ok(())
    }

    async fn scroll_offset(&self) -> Result<f64, DriverError> {
        Ok(self.state.lock().unwrap().offset)
    }
}
