use anyhow::Result;

use strongroom_access::AccessDecision;

use crate::app::App;

/// Gate one navigation the way the dashboard does before rendering a view.
pub async fn open(app: &App, path: &str) -> Result<()> {
    let session_present = app.sessions.is_authenticated().await;
    let eval = app.gate.evaluate(app.mode, path, session_present);

    match eval.decision {
        AccessDecision::Render => println!("{}: rendering", eval.route.title),
        AccessDecision::RedirectToLogin => {
            println!("{}: redirecting to Login", eval.route.title);
        },
        AccessDecision::RedirectToDefaultView => {
            let target = eval
                .decision
                .redirect_to()
                .map(|id| app.gate.table().get(id).title)
                .unwrap_or("Capital");
            println!("{}: redirecting to {target}", eval.route.title);
        },
    }
    Ok(())
}

pub async fn capital(app: &App) -> Result<()> {
    let bearer = app.sessions.bearer_token().await;
    let snapshot = app.capital.fetch(bearer.as_deref()).await?;

    println!("Initial capital:  {:.2}", snapshot.initial_capital);
    println!("Current capital:  {:.2}", snapshot.current_capital);
    println!("Profit:           {:.2} ({:.1}% ROI)", snapshot.profit, snapshot.roi);
    println!(
        "Allocation:       {:.0}% trading / {:.0}% e-commerce",
        snapshot.trading_allocation, snapshot.ecommerce_allocation
    );
    if !snapshot.transactions.is_empty() {
        println!("Transactions:");
        for tx in &snapshot.transactions {
            println!(
                "  {} {:<10} {:>10.2}  {} [{}]",
                tx.date, tx.kind, tx.amount, tx.source, tx.status
            );
        }
    }
    Ok(())
}
