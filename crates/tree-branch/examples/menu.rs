use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use tree_branch::prelude::*;

#[derive(Debug, Clone, Deserialize)]
struct MenuData {
    name: String,
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    right: Option<String>,
}

struct Session {
    allowed: &'static [&'static str],
    rights: &'static [&'static str],
}

fn main() -> Result<()> {
    env_logger::init();

    let menu: Node<MenuData> = Node::from_literal(json!({
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
    }))?;

    let processor = Processor::new(vec![
        Comparator::new(|item: &MenuData, session: &Session| {
            item.command
                .as_deref()
                .map_or(true, |command| {
                    session.allowed.iter().any(|allowed| *allowed == command)
                })
        })
        .named("state"),
        Comparator::new(|item: &MenuData, session: &Session| {
            item.right
                .as_deref()
                .map_or(true, |right| {
                    session.rights.iter().any(|granted| *granted == right)
                })
        })
        .named("authorization"),
    ]);

    let sessions = [
        (
            "no document",
            Session {
                allowed: &["open"],
                rights: &[],
            },
        ),
        (
            "read-only document",
            Session {
                allowed: &["open", "save", "close", "print"],
                rights: &[],
            },
        ),
        (
            "editable document",
            Session {
                allowed: &["open", "save", "close", "print", "cut", "copy", "paste"],
                rights: &["write"],
            },
        ),
    ];

    for (label, session) in &sessions {
        println!("{}:", label);

        let lines = processor.process_with(
            &menu,
            session,
            |item: &MenuData, children: Vec<Vec<String>>, _: &Session| {
                let mut lines = vec![item.name.clone()];
                for child in children {
                    lines.extend(child.into_iter().map(|line| format!("  {}", line)));
                }
                lines
            },
        )?;

        for line in lines.unwrap_or_default() {
            println!("  {}", line);
        }
        println!();
    }

    Ok(())
}
