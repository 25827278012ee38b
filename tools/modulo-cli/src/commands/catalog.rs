//! Catalog listing and one-off pricing.

use anyhow::Result;
use serde_json::json;

use modulo_commerce::catalog::Catalog;
use modulo_commerce::ids::{FinishId, ModuleId};
use modulo_commerce::pricing::PricingEngine;

use super::PriceArgs;
use crate::context::Context;

/// Run the catalog command.
pub fn run(ctx: &Context) -> Result<()> {
    let catalog = Catalog::standard();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "modules": catalog.modules(),
            "finishes": catalog.finishes(),
        }));
        return Ok(());
    }

    ctx.output.header("Modules");
    let widths = [4, 10, 22, 8];
    ctx.output.table_row(&["ID", "NAME", "SIZE (W × H × D)", "FROM"], &widths);
    for module in catalog.modules() {
        ctx.output.table_row(
            &[
                module.id.as_str(),
                module.name.as_str(),
                module.dimensions_cm().as_str(),
                module.base_price.display().as_str(),
            ],
            &widths,
        );
    }

    ctx.output.header("Finishes");
    let widths = [13, 13, 6];
    ctx.output.table_row(&["ID", "LABEL", "×"], &widths);
    for finish in catalog.finishes() {
        ctx.output.table_row(
            &[
                finish.id.as_str(),
                finish.label.as_str(),
                finish.multiplier.to_string().as_str(),
            ],
            &widths,
        );
    }

    Ok(())
}

/// Run the price command.
pub fn price(args: PriceArgs, ctx: &Context) -> Result<()> {
    let catalog = Catalog::standard();
    let engine = PricingEngine::new(&catalog);

    let module_id = ModuleId::new(args.module);
    let front = FinishId::new(args.front);
    let sides = FinishId::new(args.sides);

    let unit_price = engine.price_of(&module_id, &front, &sides)?;
    let total = unit_price.times(args.qty);
    let name = catalog.describe(&module_id, &front, &sides)?;

    for finish in [&front, &sides] {
        if catalog.finish(finish).is_none() {
            ctx.output
                .warn(&format!("Unknown finish '{}' priced without surcharge", finish));
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "name": name,
            "unit_price": unit_price,
            "quantity": args.qty,
            "total": total,
        }));
        return Ok(());
    }

    ctx.output.header(&name);
    ctx.output.kv("Unit price", &unit_price.display());
    ctx.output.kv("Quantity", &args.qty.to_string());
    ctx.output.total("Total", total);

    Ok(())
}
