//! Render the screen a location fragment points to.

use anyhow::Result;
use shop_state::Route;

use super::OpenArgs;
use crate::context::Context;

/// Run the open command.
pub async fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let route = Route::parse(&args.fragment);
    ctx.output.debug(&format!("{} -> {:?}", args.fragment, route));
    super::browse::render_once(ctx, route).await
}
