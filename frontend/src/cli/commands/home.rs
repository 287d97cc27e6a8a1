//! Home dashboard handler

use anyhow::{bail, Result};
use me_bau::domain::session_gate::Route;
use me_bau::services::date_utils::{today, TODAY_INDEX};
use me_bau::state::HomeState;

use super::Context;

pub async fn show(ctx: &Context) -> Result<()> {
    let state = HomeState::load(&ctx.api, &ctx.session, today()).await;

    match state.route() {
        Some(Route::Dashboard) => {}
        Some(Route::Login) | None => bail!("Bạn chưa đăng nhập. Hãy chạy `me-bau login`"),
        Some(Route::FillInfo) => {
            bail!("Hồ sơ thai kỳ chưa đầy đủ. Hãy chạy `me-bau fill-info`")
        }
    }

    if let Some(profile) = &state.profile {
        println!("\nXin chào, {}!", profile.name);
    }

    let strip: Vec<String> = state
        .week_strip
        .iter()
        .enumerate()
        .map(|(i, day)| {
            if i == TODAY_INDEX {
                format!("[{day:>2}]")
            } else {
                format!(" {day:>2} ")
            }
        })
        .collect();
    println!("{}", strip.join(""));

    let digits: String = state.countdown_digits().iter().map(u8::to_string).collect();
    println!("\n{}", state.timeline.month_summary());
    println!("Đã mang thai: {}", state.timeline.week_summary());
    println!("Còn {digits} ngày nữa bé chào đời");
    Ok(())
}
