// One-shot reads for scripting: unlike the interactive client, failures are reported through
// the exit code instead of being swallowed.

use remote_chess::config::default_base_url;
use remote_chess::document::{GameStateDocument, PgnDocument, ScoreSummary};
use remote_chess::status;
use remote_chess::transport::{ApiClient, Endpoint};

use crate::client_config::parse_base_url;
use crate::http_transport::ReqwestTransport;
use crate::tui::render_details;


#[derive(Clone, Copy, Debug)]
pub enum Query {
    Pgn,
    Score,
    State,
}

pub fn run(query: Query, base_url: Option<&str>) -> anyhow::Result<()> {
    let base_url = match base_url {
        Some(url) => parse_base_url(url)?,
        None => default_base_url(),
    };
    let api = ApiClient::new(base_url, Box::new(ReqwestTransport::new()))?;
    async_std::task::block_on(async {
        match query {
            Query::Pgn => {
                let doc: PgnDocument = api.request(&Endpoint::Pgn).await?;
                println!("{}", doc.pgn);
            }
            Query::Score => {
                let score: ScoreSummary = api.request(&Endpoint::Score).await?;
                println!("White: {}  Black: {}", score.score_white, score.score_black);
            }
            Query::State => {
                let doc: GameStateDocument = api.request(&Endpoint::GameState).await?;
                let view = status::reduce(&doc);
                println!("{}\n{}\n{}", view.header_text, view.calculated_line, view.score_text);
                println!("{}", render_details(&view.score_table));
            }
        }
        Ok(())
    })
}
