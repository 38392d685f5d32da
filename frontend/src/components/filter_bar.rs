use yew::prelude::*;
use web_sys::MouseEvent;
use shared::Resident;
use crate::components::date_range_picker::DateRangePicker;
use crate::components::resident_selector::ResidentSelector;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub residents: Vec<Resident>,
    pub selected_resident: String,
    pub start_date: String,
    pub end_date: String,
    pub loading: bool,
    pub on_resident_change: Callback<String>,
    pub on_range_change: Callback<(String, String)>,
    pub on_query: Callback<()>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let onclick = {
        let on_query = props.on_query.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_query.emit(());
        })
    };

    html! {
        <section class="filter-bar">
            <ResidentSelector
                residents={props.residents.clone()}
                selected={props.selected_resident.clone()}
                disabled={props.loading}
                on_change={props.on_resident_change.clone()}
            />
            <DateRangePicker
                start_date={props.start_date.clone()}
                end_date={props.end_date.clone()}
                disabled={props.loading}
                on_change={props.on_range_change.clone()}
            />
            <button
                id="queryButton"
                type="button"
                class="btn btn-primary"
                disabled={props.loading}
                {onclick}
            >
                if props.loading {
                    {"Loading..."}
                } else {
                    {"Query"}
                }
            </button>
        </section>
    }
}
