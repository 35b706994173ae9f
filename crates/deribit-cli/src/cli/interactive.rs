/*
[INPUT]:  Authenticated session and user input via CLI
[OUTPUT]: Rendered operation results, one menu round at a time
[POS]:    CLI interactive flow
[UPDATE]: When adding menu actions
*/

use std::sync::Arc;

use anyhow::Result;
use console::style;
use deribit_adapter::{
    CancelOrderRequest, DeribitClient, Dispatcher, ModifyOrderRequest, OpenOrdersRequest,
    OrderBookRequest, PlaceOrderRequest, PositionRequest, Session,
};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use rust_decimal::Decimal;

use deribit_cli::config::AppConfig;
use deribit_cli::render;

const ACTIONS: [&str; 8] = [
    "Place Order",
    "Modify Order",
    "Cancel Order",
    "Get Order Book",
    "Get Position",
    "Get Open Orders",
    "Perform Parallel Tasks",
    "Exit",
];

/// Menu loop; operation failures are rendered and the loop continues
pub async fn run_interactive(
    client: Arc<DeribitClient>,
    session: Arc<Session>,
    config: &AppConfig,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Deribit Trading CLI").bold().cyan());

    loop {
        println!();
        let selection = Select::with_theme(&theme)
            .with_prompt("Menu")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match selection {
            0 => place_order(&client, &session, &theme).await?,
            1 => modify_order(&client, &session, &theme).await?,
            2 => cancel_order(&client, &session, &theme).await?,
            3 => order_book(&client, &session, &theme).await?,
            4 => position(&client, &session, &theme).await?,
            5 => open_orders(&client, &session).await,
            6 => parallel(&client, &session, config).await?,
            _ => {
                println!("Exiting...");
                return Ok(());
            }
        }
    }
}

fn prompt_decimal(theme: &ColorfulTheme, prompt: &str) -> Result<Decimal> {
    Ok(Input::<Decimal>::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()?)
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()?;
    Ok(value.trim().to_string())
}

async fn place_order(client: &DeribitClient, session: &Session, theme: &ColorfulTheme) -> Result<()> {
    let price = prompt_decimal(theme, "Enter price")?;
    let amount = prompt_decimal(theme, "Enter amount")?;
    let instrument = prompt_text(theme, "Enter instrument name")?;

    let req = PlaceOrderRequest::limit(instrument, price, amount);
    match client.place_order(session, &req).await {
        Ok(reply) => render::print(&render::order_response("Place Order Response", &reply)),
        Err(err) => render::print(&render::error(&err)),
    }
    Ok(())
}

async fn modify_order(client: &DeribitClient, session: &Session, theme: &ColorfulTheme) -> Result<()> {
    let order_id = prompt_text(theme, "Enter order ID")?;
    let price = prompt_decimal(theme, "Enter new price")?;
    let amount = prompt_decimal(theme, "Enter new amount")?;

    let req = ModifyOrderRequest {
        order_id,
        price,
        amount,
    };
    match client.modify_order(session, &req).await {
        Ok(reply) => render::print(&render::order_response("Order modified successfully", &reply)),
        Err(err) => render::print(&render::error(&err)),
    }
    Ok(())
}

async fn cancel_order(client: &DeribitClient, session: &Session, theme: &ColorfulTheme) -> Result<()> {
    let order_id = prompt_text(theme, "Enter order ID")?;
    match client
        .cancel_order(session, &CancelOrderRequest { order_id })
        .await
    {
        Ok(reply) => render::print(&render::order_response("Cancel Order Response", &reply)),
        Err(err) => render::print(&render::error(&err)),
    }
    Ok(())
}

async fn order_book(client: &DeribitClient, session: &Session, theme: &ColorfulTheme) -> Result<()> {
    let instrument = prompt_text(theme, "Enter instrument name")?;
    match client
        .get_order_book(Some(session), &OrderBookRequest::new(instrument))
        .await
    {
        Ok(reply) => render::print(&render::order_book(&reply.value, reply.latency)),
        Err(err) => render::print(&render::error(&err)),
    }
    Ok(())
}

async fn position(client: &DeribitClient, session: &Session, theme: &ColorfulTheme) -> Result<()> {
    let instrument_name = prompt_text(theme, "Enter instrument name")?;
    match client
        .get_position(session, &PositionRequest { instrument_name })
        .await
    {
        Ok(reply) => render::print(&render::position(&reply.value)),
        Err(err) => render::print(&render::error(&err)),
    }
    Ok(())
}

async fn open_orders(client: &DeribitClient, session: &Session) {
    match client
        .get_open_orders(session, &OpenOrdersRequest::default())
        .await
    {
        Ok(reply) => {
            println!("{}", style("Open Orders:").bold());
            if reply.value.is_empty() {
                println!("{}", style("No open orders.").yellow());
            }
            render::print(&render::open_orders(&reply.value));
        }
        Err(err) => render::print(&render::error(&err)),
    }
}

/// Detached tasks keep running on the runtime while the menu continues
async fn parallel(client: &Arc<DeribitClient>, session: &Arc<Session>, config: &AppConfig) -> Result<()> {
    let specs = match config.parallel.task_specs() {
        Ok(specs) => specs,
        Err(err) => {
            println!("{} {err:#}", style("✗").red().bold());
            return Ok(());
        }
    };
    let report = Dispatcher::new(Arc::clone(client))
        .run_parallel(Arc::clone(session), specs)
        .await;
    render::print(&render::dispatch_report(&report));
    Ok(())
}
