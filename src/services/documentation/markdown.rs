//! 渲染树的 Markdown 输出

use super::render::{Block, RenderTree, SectionBody, TreeNode};

/// 将渲染树转换为 Markdown 文本
pub fn to_markdown(tree: &RenderTree) -> String {
    match tree {
        RenderTree::Loading => "_Loading..._\n".to_string(),
        RenderTree::Failed { message } => format!("**Error:** {}\n", message),
        RenderTree::Rendered { title, sections } => {
            let mut output = format!("# {}\n\n", title);
            for section in sections {
                output.push_str(&format!("## {}\n\n", section.heading));
                match &section.body {
                    SectionBody::Placeholder { message } => {
                        output.push_str(&format!("_{}_\n\n", message));
                    }
                    SectionBody::Content { blocks } => {
                        for block in blocks {
                            render_block(&mut output, block);
                        }
                    }
                }
            }
            output
        }
    }
}

fn render_block(output: &mut String, block: &Block) {
    match block {
        Block::Heading { text } => output.push_str(&format!("### {}\n\n", text)),
        Block::Paragraph { text } => output.push_str(&format!("{}\n\n", text)),
        Block::List { items } => {
            for item in items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }
        Block::Definitions { items } => {
            for item in items {
                output.push_str(&format!("- **{}**: {}\n", item.term, item.description));
            }
            output.push('\n');
        }
        Block::Table { headers, rows } => {
            output.push_str(&table_row(headers));
            output.push_str(&format!("|{}\n", " --- |".repeat(headers.len())));
            for row in rows {
                output.push_str(&table_row(row));
            }
            output.push('\n');
        }
        Block::Tree { nodes } => {
            for node in nodes {
                render_tree_node(output, node, 0);
            }
            output.push('\n');
        }
        Block::Code { text } => {
            let fence = code_fence(text);
            output.push_str(&format!("{fence}\n{text}\n{fence}\n\n"));
        }
    }
}

/// 围栏长度比内容中最长的连续反引号多一，至少三个
fn code_fence(text: &str) -> String {
    let longest = text.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn table_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// 表格单元格中的竖线和换行需要转义
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', "<br>")
}

fn render_tree_node(output: &mut String, node: &TreeNode, depth: usize) {
    let suffix = if node.folder { "/" } else { "" };
    output.push_str(&format!("{}- {}{}\n", "  ".repeat(depth), node.name, suffix));
    for child in &node.children {
        render_tree_node(output, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::documentation::catalog::SectionId;
    use crate::services::documentation::fixtures::partial_documentation;
    use crate::services::documentation::model::DocumentationModel;
    use crate::services::documentation::render::{render_documentation, PLACEHOLDER_TEXT};

    #[test]
    fn test_markdown_layout() {
        let model = DocumentationModel::from_json(partial_documentation(&[
            SectionId::GettingStarted,
            SectionId::CodeStructureOverview,
            SectionId::Dependencies,
        ]));
        let markdown = to_markdown(&render_documentation(
            &model,
            Some("https://github.com/spring-projects/spring-petclinic"),
        ));

        assert!(markdown.starts_with("# Documentation for spring-projects/spring-petclinic\n"));
        assert_eq!(markdown.matches("\n## ").count(), 15);
        assert_eq!(markdown.matches(PLACEHOLDER_TEXT).count(), 12);
        assert!(markdown.contains("### Prerequisites\n\n- Java 17\n- Maven 3.9\n"));
        assert!(markdown.contains("- src/\n  - PetClinicApplication.java\n"));
        assert!(markdown.contains("| Library | Version |\n| --- | --- |\n| spring-boot-starter-web | 3.2.0 |\n"));
    }

    #[test]
    fn test_markdown_states() {
        assert_eq!(to_markdown(&RenderTree::Loading), "_Loading..._\n");
        assert_eq!(
            to_markdown(&RenderTree::Failed {
                message: "repo not found".to_string()
            }),
            "**Error:** repo not found\n"
        );
    }

    #[test]
    fn test_code_fence_outlasts_content() {
        let mut output = String::new();
        render_block(&mut output, &Block::Code { text: "GET /owners".to_string() });
        assert_eq!(output, "```\nGET /owners\n```\n\n");

        let text = "```rust\nfn main() {}\n```".to_string();
        let mut output = String::new();
        render_block(&mut output, &Block::Code { text: text.clone() });
        assert_eq!(output, format!("````\n{}\n````\n\n", text));

        assert_eq!(code_fence("a ````` b"), "``````");
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b\nc"), "a\\|b<br>c");
    }
}
