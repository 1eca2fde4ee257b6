// Timer-driven reconciliation. The sleep function is injected so that the same loop runs on
// async-std in the console client and on a fast clock in tests. The browser client uses
// `setInterval` instead and calls `ClientSession::reconcile` directly.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::future::{self, Either};
use futures_util::stream::FuturesUnordered;

use crate::client::ClientSession;


// Never returns: the poll loop lives as long as the client does.
//
// A tick does not wait for the previous reconciliation to finish. Requests have no timeout, so
// a response that never arrives would otherwise stop polling for good. Outstanding
// reconciliations are driven between ticks.
pub async fn poll_forever<S, F>(session: &ClientSession, mut sleep: S)
where
    S: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    let interval = session.options().poll_interval;
    log::info!("Polling every {:?}", interval);
    let mut in_flight = FuturesUnordered::new();
    loop {
        in_flight.push(session.reconcile());
        let mut tick = pin!(sleep(interval));
        loop {
            match future::select(tick, in_flight.next()).await {
                Either::Left(((), _)) => break,
                Either::Right((Some(()), pending_tick)) => tick = pending_tick,
                Either::Right((None, pending_tick)) => {
                    pending_tick.await;
                    break;
                }
            }
        }
        if in_flight.len() > 1 {
            log::debug!("{} reconciliations in flight", in_flight.len());
        }
    }
}
