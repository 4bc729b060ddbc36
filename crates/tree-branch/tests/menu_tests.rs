use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};
use tree_branch::{Comparator, Node, Predicate, Processor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Command {
    Open,
    Save,
    Close,
    Print,
    Cut,
    Copy,
    Paste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Right {
    Write,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct MenuData {
    name: String,
    #[serde(default)]
    command: Option<Command>,
    #[serde(default)]
    right: Option<Right>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    Passive,
    Active,
}

impl State {
    fn allows(self, command: Command) -> bool {
        match self {
            State::None => command == Command::Open,
            State::Passive => matches!(
                command,
                Command::Open | Command::Save | Command::Close | Command::Print
            ),
            State::Active => true,
        }
    }
}

struct MenuContext {
    state: State,
    rights: Vec<Right>,
}

impl MenuContext {
    fn new(state: State) -> Self {
        Self {
            state,
            rights: Vec::new(),
        }
    }

    fn with_right(mut self, right: Right) -> Self {
        self.rights.push(right);
        self
    }
}

/// Keeps items whose command is allowed in the current state
struct StateComparator {
    command: Option<Command>,
    state: State,
}

impl Predicate<MenuData, MenuContext> for StateComparator {
    fn from_parts(data: &MenuData, context: &MenuContext) -> anyhow::Result<Self> {
        Ok(Self {
            command: data.command,
            state: context.state,
        })
    }

    fn is_valid(&self) -> anyhow::Result<bool> {
        Ok(self.command.map_or(true, |command| self.state.allows(command)))
    }
}

/// Keeps items whose required right has been granted
struct AuthorizationComparator {
    required: Option<Right>,
    granted: Vec<Right>,
}

impl Predicate<MenuData, MenuContext> for AuthorizationComparator {
    fn from_parts(data: &MenuData, context: &MenuContext) -> anyhow::Result<Self> {
        Ok(Self {
            required: data.right,
            granted: context.rights.clone(),
        })
    }

    fn is_valid(&self) -> anyhow::Result<bool> {
        Ok(self
            .required
            .map_or(true, |right| self.granted.contains(&right)))
    }
}

#[derive(Debug, PartialEq)]
struct MenuItem {
    name: String,
    menu_items: Vec<MenuItem>,
}

impl MenuItem {
    fn new(name: &str, menu_items: Vec<MenuItem>) -> Self {
        Self {
            name: name.to_string(),
            menu_items,
        }
    }
}

fn menu_literal() -> Value {
    json!({
        "data": { "name": "Menu" },
        "children": [
            {
                "data": { "name": "File" },
                "children": [
                    { "data": { "name": "Open", "command": "open" } },
                    { "data": { "name": "Save", "command": "save", "right": "write" } },
                    { "data": { "name": "Close", "command": "close" } },
                    {
                        "data": { "name": "Print", "command": "print" },
                        "children": [
                            { "data": { "name": "Print" } },
                            { "data": { "name": "Print Preview" } }
                        ]
                    }
                ]
            },
            {
                "data": { "name": "Edit" },
                "children": [
                    { "data": { "name": "Cut", "command": "cut" } },
                    { "data": { "name": "Copy", "command": "copy" } },
                    { "data": { "name": "Paste", "command": "paste" } }
                ]
            }
        ]
    })
}

fn menu() -> Node<MenuData> {
    Node::from_literal(menu_literal()).unwrap()
}

fn tree(literal: Value) -> Node<MenuData> {
    Node::from_literal(literal).unwrap()
}

/// Render surviving items as an indented outline
fn outline(processor: &Processor<MenuData, MenuContext>, context: &MenuContext) -> String {
    let render = |data: &MenuData, children: Vec<String>, _: &MenuContext| {
        let mut out = data.name.clone();
        for child in children {
            for line in child.lines() {
                out.push_str("\n  ");
                out.push_str(line);
            }
        }
        out
    };

    processor
        .process_with(&menu(), context, render)
        .unwrap()
        .unwrap_or_default()
}

fn full_file_menu() -> Value {
    json!({
        "data": { "name": "File" },
        "children": [
            { "data": { "name": "Open", "command": "open" } },
            { "data": { "name": "Save", "command": "save", "right": "write" } },
            { "data": { "name": "Close", "command": "close" } },
            {
                "data": { "name": "Print", "command": "print" },
                "children": [
                    { "data": { "name": "Print" } },
                    { "data": { "name": "Print Preview" } }
                ]
            }
        ]
    })
}

#[test]
fn test_state_none() {
    let actual: Option<Node<MenuData>> = tree_branch::process(
        menu_literal(),
        &MenuContext::new(State::None),
        Comparator::stateful::<StateComparator>(),
    )
    .unwrap();

    let expected = tree(json!({
        "data": { "name": "Menu" },
        "children": [
            {
                "data": { "name": "File" },
                "children": [
                    { "data": { "name": "Open", "command": "open" } }
                ]
            },
            { "data": { "name": "Edit" } }
        ]
    }));

    assert_eq!(actual, Some(expected));
}

#[test]
fn test_state_passive() {
    let actual: Option<Node<MenuData>> = tree_branch::process(
        menu_literal(),
        &MenuContext::new(State::Passive),
        Comparator::stateful::<StateComparator>(),
    )
    .unwrap();

    let expected = tree(json!({
        "data": { "name": "Menu" },
        "children": [
            full_file_menu(),
            { "data": { "name": "Edit" } }
        ]
    }));

    assert_eq!(actual, Some(expected));
}

#[test]
fn test_state_active() {
    let actual: Option<Node<MenuData>> = tree_branch::process(
        menu_literal(),
        &MenuContext::new(State::Active),
        Comparator::stateful::<StateComparator>(),
    )
    .unwrap();

    assert_eq!(actual, Some(menu()));
}

#[test]
fn test_passive_read_only_drops_save() {
    let actual: Option<Node<MenuData>> = tree_branch::process(
        menu(),
        &MenuContext::new(State::Passive),
        vec![
            Comparator::stateful::<StateComparator>(),
            Comparator::stateful::<AuthorizationComparator>(),
        ],
    )
    .unwrap();

    let expected = tree(json!({
        "data": { "name": "Menu" },
        "children": [
            {
                "data": { "name": "File" },
                "children": [
                    { "data": { "name": "Open", "command": "open" } },
                    { "data": { "name": "Close", "command": "close" } },
                    {
                        "data": { "name": "Print", "command": "print" },
                        "children": [
                            { "data": { "name": "Print" } },
                            { "data": { "name": "Print Preview" } }
                        ]
                    }
                ]
            },
            { "data": { "name": "Edit" } }
        ]
    }));

    assert_eq!(actual, Some(expected));
}

#[test]
fn test_passive_read_write_keeps_save() {
    let actual: Option<Node<MenuData>> = tree_branch::process(
        menu(),
        &MenuContext::new(State::Passive).with_right(Right::Write),
        vec![
            Comparator::stateful::<StateComparator>(),
            Comparator::stateful::<AuthorizationComparator>(),
        ],
    )
    .unwrap();

    let expected = tree(json!({
        "data": { "name": "Menu" },
        "children": [
            full_file_menu(),
            { "data": { "name": "Edit" } }
        ]
    }));

    assert_eq!(actual, Some(expected));
}

#[test]
fn test_closure_comparator_and_custom_output() {
    let authorized = Comparator::new(|data: &MenuData, context: &MenuContext| {
        data.right.map_or(true, |right| context.rights.contains(&right))
    });

    let actual: Option<MenuItem> = tree_branch::process_with(
        menu_literal(),
        &MenuContext::new(State::Passive).with_right(Right::Write),
        [Comparator::stateful::<StateComparator>(), authorized],
        |data: &MenuData, children: Vec<MenuItem>, _: &MenuContext| {
            MenuItem::new(&data.name, children)
        },
    )
    .unwrap();

    let expected = MenuItem::new(
        "Menu",
        vec![
            MenuItem::new(
                "File",
                vec![
                    MenuItem::new("Open", vec![]),
                    MenuItem::new("Save", vec![]),
                    MenuItem::new("Close", vec![]),
                    MenuItem::new(
                        "Print",
                        vec![
                            MenuItem::new("Print", vec![]),
                            MenuItem::new("Print Preview", vec![]),
                        ],
                    ),
                ],
            ),
            MenuItem::new("Edit", vec![]),
        ],
    );

    assert_eq!(actual, Some(expected));
}

#[test]
fn test_outline_snapshots() {
    let processor = Processor::new(vec![
        Comparator::stateful::<StateComparator>(),
        Comparator::stateful::<AuthorizationComparator>(),
    ]);

    insta::assert_snapshot!(outline(&processor, &MenuContext::new(State::None)), @r###"
    Menu
      File
        Open
      Edit
    "###);

    insta::assert_snapshot!(outline(&processor, &MenuContext::new(State::Passive)), @r###"
    Menu
      File
        Open
        Close
        Print
          Print
          Print Preview
      Edit
    "###);

    let admin = MenuContext::new(State::Active).with_right(Right::Write);
    insta::assert_snapshot!(outline(&processor, &admin), @r###"
    Menu
      File
        Open
        Save
        Close
        Print
          Print
          Print Preview
      Edit
        Cut
        Copy
        Paste
    "###);
}

#[test]
fn test_fallible_combiner_through_facade() {
    let names: Option<Vec<String>> = tree_branch::try_process_with(
        menu_literal(),
        &MenuContext::new(State::None),
        Comparator::stateful::<StateComparator>(),
        |data: &MenuData, children: Vec<Vec<String>>, _: &MenuContext| {
            anyhow::ensure!(!data.name.is_empty(), "menu item without a name");
            let mut names = vec![data.name.clone()];
            names.extend(children.into_iter().flatten());
            Ok(names)
        },
    )
    .unwrap();

    assert_eq!(
        names,
        Some(vec![
            "Menu".to_string(),
            "File".to_string(),
            "Open".to_string(),
            "Edit".to_string(),
        ])
    );
}
