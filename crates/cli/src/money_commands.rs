use anyhow::Result;

use strongroom_payments::PaymentError;

use crate::app::App;

pub async fn deposit(app: &App, amount: i64, currency: &str, browse: bool) -> Result<()> {
    let mut session = app.payments.create_deposit(amount, currency).await?;
    println!("Checkout session {}", session.id);
    println!("{}", session.checkout_url);

    if browse && open::that(&session.checkout_url).is_ok() {
        session.mark_redirected();
    }
    Ok(())
}

pub async fn withdraw(app: &App, amount: i64, holder: &str, iban: &str) -> Result<()> {
    match app.payments.submit_withdrawal(amount, holder, iban).await {
        Ok(request) => {
            println!(
                "Withdrawal {:?}: {} minor units to {}",
                request.status, request.amount_minor, request.account_holder
            );
            Ok(())
        },
        Err(PaymentError::WithdrawalUnavailable { .. }) => {
            println!("Withdrawal service unavailable, try again later.");
            Ok(())
        },
        Err(e) => Err(e.into()),
    }
}
