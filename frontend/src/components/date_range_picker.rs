use yew::prelude::*;
use web_sys::HtmlInputElement;

#[derive(Properties, PartialEq)]
pub struct DateRangePickerProps {
    pub start_date: String,
    pub end_date: String,
    pub disabled: bool,
    /// Emits the full (start, end) pair whenever either side changes
    pub on_change: Callback<(String, String)>,
}

/// Two native date inputs acting as one range picker
#[function_component(DateRangePicker)]
pub fn date_range_picker(props: &DateRangePickerProps) -> Html {
    let on_start = {
        let on_change = props.on_change.clone();
        let end_date = props.end_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((input.value(), end_date.clone()));
        })
    };

    let on_end = {
        let on_change = props.on_change.clone();
        let start_date = props.start_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((start_date.clone(), input.value()));
        })
    };

    html! {
        <div class="form-group date-range-picker">
            <label for="dateRangeStart">{"Date range"}</label>
            <div class="date-range-inputs">
                <input
                    id="dateRangeStart"
                    type="date"
                    class="form-control"
                    value={props.start_date.clone()}
                    max={props.end_date.clone()}
                    disabled={props.disabled}
                    onchange={on_start}
                />
                <span class="date-range-separator">{"to"}</span>
                <input
                    id="dateRangeEnd"
                    type="date"
                    class="form-control"
                    value={props.end_date.clone()}
                    min={props.start_date.clone()}
                    disabled={props.disabled}
                    onchange={on_end}
                />
            </div>
        </div>
    }
}
