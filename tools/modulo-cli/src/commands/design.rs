//! Design proposal intake.

use anyhow::{Context as _, Result};
use serde_json::json;

use modulo_commerce::design::DesignProposal;

use super::DesignArgs;
use crate::context::Context;

/// Run the design command.
pub fn run(args: DesignArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read design file: {}", path.display()))?;
    let proposal: DesignProposal = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse design file: {}", path.display()))?;

    ctx.output.debug(&format!(
        "Design {} with {} selection(s)",
        proposal.tag,
        proposal.items.len()
    ));

    let mut cart = ctx.open_cart()?;
    let ids = cart.add_design(&proposal)?;

    let group_total = cart.group_total(proposal.tag.as_str());

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "tag": proposal.tag,
            "line_item_ids": ids,
            "group_total": group_total,
            "total": cart.total(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Added design {} ({} line item(s))",
        proposal.tag,
        ids.len()
    ));
    for id in &ids {
        if let Some(item) = cart.get(id) {
            let name = item
                .display_name(cart.catalog())
                .unwrap_or_else(|_| item.module_id.to_string());
            ctx.output.list_item(&format!("{} × {}", item.quantity, name));
        }
    }
    ctx.output.total("Design total", group_total);
    ctx.output.total("Cart total", cart.total());

    Ok(())
}
