use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use quiz_model::Quiz;
use quiz_validate::{Category, ValidationReport};

use crate::commands::StoredQuiz;

pub fn issues_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Category"),
        header_cell("Question"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, issue) in report.into_iter().enumerate() {
        let question = match issue.question() {
            Some(position) => Cell::new(position),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            dim_cell(index + 1),
            category_cell(issue.category()),
            question,
            Cell::new(issue.message()),
        ]);
    }
    table
}

pub fn quiz_table(quiz: &Quiz) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Question"),
        header_cell("Options"),
        header_cell("Correct"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, question) in quiz.questions.iter().enumerate() {
        let correct: Vec<&str> = question
            .options
            .iter()
            .filter(|option| option.answer.is_correct)
            .map(|option| option.option.as_str())
            .collect();
        let correct = if correct.is_empty() {
            Cell::new("none").fg(Color::Red)
        } else {
            Cell::new(correct.join(", "))
        };
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&question.question),
            Cell::new(question.options.len()),
            correct,
        ]);
    }
    table
}

pub fn store_table(entries: &[StoredQuiz]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Version"),
        header_cell("Questions"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for entry in entries {
        table.add_row(vec![
            dim_cell(&entry.id),
            Cell::new(&entry.name),
            Cell::new(entry.version),
            Cell::new(entry.questions),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn category_cell(category: Category) -> Cell {
    let color = match category {
        Category::Context | Category::Header => Color::Yellow,
        Category::Structure | Category::Correctness => Color::Red,
        Category::Content => Color::Magenta,
    };
    Cell::new(category.label()).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
