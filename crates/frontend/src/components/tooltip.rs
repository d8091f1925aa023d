use dioxus::prelude::*;
use worldmap_shared::models::TooltipState;
use worldmap_shared::style::TOOLTIP_OFFSET_Y;

#[component]
pub fn Tooltip(tooltip: TooltipState) -> Element {
    let left = tooltip.position.x;
    let top = tooltip.position.y - TOOLTIP_OFFSET_Y;

    rsx! {
        div {
            class: "tooltip",
            role: "tooltip",
            style: "left: {left}px; top: {top}px;",
            "{tooltip.content}"
        }
    }
}
