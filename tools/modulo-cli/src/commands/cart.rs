//! Cart mutation and display commands.

use anyhow::Result;
use dialoguer::Confirm;
use serde_json::json;

use modulo_cache::KeyValueStore;
use modulo_commerce::cart::{AddItem, CartStore, LineItem};
use modulo_commerce::ids::LineItemId;

use super::{AddArgs, ClearArgs, QtyArgs, RemoveArgs, ShowArgs};
use crate::context::Context;

const TABLE_WIDTHS: [usize; 5] = [14, 48, 4, 7, 8];

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    let mut candidate = AddItem::new(args.module, args.front, args.sides).quantity(args.qty);
    if let Some(group) = args.group {
        candidate = candidate.group(group);
    }

    let id = cart.add(candidate)?;
    let quantity = cart.get(&id).map(|i| i.quantity).unwrap_or_default();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "line_item_id": id,
            "quantity": quantity,
            "total": cart.total(),
        }));
        return Ok(());
    }

    ctx.output
        .success(&format!("Added to cart: {} (quantity {})", id, quantity));
    ctx.output.total("Cart total", cart.total());

    Ok(())
}

/// Run the qty command.
pub fn qty(args: QtyArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = LineItemId::new(args.id);

    let updated = match (args.delta, args.set) {
        (_, Some(quantity)) => cart.set_quantity(&id, quantity),
        (Some(delta), None) => cart.set_quantity_delta(&id, delta),
        (None, None) => None,
    };

    let Some(quantity) = updated else {
        ctx.output
            .warn(&format!("No line item {} in the cart; nothing changed", id));
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "line_item_id": id,
            "quantity": quantity,
            "total": cart.total(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!("{} quantity is now {}", id, quantity));
    ctx.output.total("Cart total", cart.total());

    Ok(())
}

/// Run the remove command.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = LineItemId::new(args.id);

    let removed = cart.remove_item(&id);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "line_item_id": id,
            "removed": removed,
            "total": cart.total(),
        }));
        return Ok(());
    }

    if removed {
        ctx.output.success(&format!("Removed {}", id));
    } else {
        ctx.output
            .warn(&format!("No line item {} in the cart; nothing changed", id));
    }
    ctx.output.total("Cart total", cart.total());

    Ok(())
}

/// Run the clear command.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if cart.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                cart.item_count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    cart.clear();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cleared": true }));
    } else {
        ctx.output.success("Cart cleared");
    }

    Ok(())
}

/// Run the show command.
pub fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;

    if ctx.output.is_json() {
        if args.grouped {
            ctx.output.json(&json!({
                "groups": cart.grouped_view(),
                "total": cart.total(),
            }));
        } else {
            ctx.output.json(&json!({
                "items": cart.items(),
                "pricing": cart.quote(),
                "total": cart.total(),
            }));
        }
        return Ok(());
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    if args.grouped {
        for group in cart.grouped_view() {
            ctx.output.header(&group.label);
            print_rows(&cart, &group.items, ctx);
            ctx.output.total("Subtotal", group.total);
        }
        ctx.output.info("");
    } else {
        ctx.output.header("Cart");
        print_rows(&cart, &cart.items(), ctx);
    }

    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.total("Total", cart.total());

    Ok(())
}

pub(crate) fn print_rows<S: KeyValueStore>(
    cart: &CartStore<S>,
    items: &[LineItem],
    ctx: &Context,
) {
    ctx.output
        .table_row(&["ID", "ITEM", "QTY", "EACH", "TOTAL"], &TABLE_WIDTHS);

    let engine = cart.pricing();
    for item in items {
        let name = item
            .display_name(cart.catalog())
            .unwrap_or_else(|_| item.module_id.to_string());
        let unit = engine
            .price_of(&item.module_id, &item.front_finish_id, &item.sides_finish_id)
            .unwrap_or_default();

        ctx.output.table_row(
            &[
                item.id.as_str(),
                name.as_str(),
                item.quantity.to_string().as_str(),
                unit.display().as_str(),
                unit.times(item.quantity).display().as_str(),
            ],
            &TABLE_WIDTHS,
        );
    }
}
