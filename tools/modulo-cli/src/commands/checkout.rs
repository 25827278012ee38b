//! Checkout review and simulated payment.

use anyhow::{bail, Result};
use dialoguer::Confirm;

use modulo_commerce::checkout::{self, CheckoutSummary};

use super::CheckoutArgs;
use crate::commands::cart::print_rows;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let summary = CheckoutSummary::from_store(&cart);

    if summary.is_empty() {
        bail!("Your cart is empty. Add something with `modulo add` first.");
    }

    if !args.pay {
        if ctx.output.is_json() {
            ctx.output.json(&summary);
            return Ok(());
        }

        ctx.output.header("Checkout");
        for group in &summary.groups {
            ctx.output.header(&group.label);
            print_rows(&cart, &group.items, ctx);
            ctx.output.total("Subtotal", group.total);
        }
        ctx.output.info("");
        ctx.output.kv("Items", &summary.item_count.to_string());
        ctx.output.total("Amount due", summary.total);
        ctx.output.info("Run `modulo checkout --pay` to place the order.");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Pay {} now?", summary.total))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Payment cancelled");
            return Ok(());
        }
    }

    let receipt = checkout::pay(&mut cart)?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.success("Payment complete");
    ctx.output.kv("Order", receipt.order_id.as_str());
    ctx.output.kv(
        "Paid at",
        &receipt.paid_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    ctx.output.kv("Items", &receipt.item_count.to_string());
    ctx.output.total("Paid", receipt.total);

    Ok(())
}
