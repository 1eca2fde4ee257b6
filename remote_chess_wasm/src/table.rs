use std::fmt;

use itertools::Itertools;
use remote_chess::status::ScoreTable;


#[derive(Clone, Debug, Default)]
pub struct TD {
    pub text: String,
    pub classes: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct HtmlTable {
    class: String,
    rows: Vec<String>,
}

pub fn td(text: impl fmt::Display) -> TD {
    TD {
        text: html_escape::encode_text(&text.to_string()).into_owned(),
        classes: vec![],
    }
}

impl TD {
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.classes.extend(classes.into_iter().map(|class| class.into()));
        self
    }

    pub fn to_html(&self) -> String {
        if self.classes.is_empty() {
            format!("<td>{}</td>", self.text)
        } else {
            format!("<td class='{}'>{}</td>", self.classes.join(" "), self.text)
        }
    }
}

impl HtmlTable {
    pub fn new(class: &str) -> Self { HtmlTable { class: class.to_owned(), rows: vec![] } }

    pub fn add_row(&mut self, row: impl IntoIterator<Item = TD>) {
        self.rows
            .push(format!("<tr>{}</tr>", row.into_iter().map(|cell| cell.to_html()).join("")));
    }

    pub fn to_html(&self) -> String {
        format!("<table class='{}'>{}</table>", self.class, self.rows.join(""))
    }
}

pub fn score_table_html(table: &ScoreTable) -> String {
    let mut html = HtmlTable::new("details-table");
    for row in table.rows.iter() {
        html.add_row([td(&row.label).with_classes(["details-label"]), td(&row.value)]);
    }
    format!("<div class='game-details-container'>{}</div>", html.to_html())
}


#[cfg(test)]
mod tests {
    use remote_chess::status::ScoreRow;

    use super::*;

    #[test]
    fn escapes_text() {
        let table = ScoreTable {
            rows: vec![ScoreRow { label: "Repetition <script>".to_owned(), value: "2".to_owned() }],
        };
        assert_eq!(
            score_table_html(&table),
            "<div class='game-details-container'><table class='details-table'>\
             <tr><td class='details-label'>Repetition &lt;script&gt;</td><td>2</td></tr>\
             </table></div>"
        );
    }
}
