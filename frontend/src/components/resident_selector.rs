use yew::prelude::*;
use web_sys::HtmlSelectElement;
use shared::Resident;

#[derive(Properties, PartialEq)]
pub struct ResidentSelectorProps {
    pub residents: Vec<Resident>,
    pub selected: String,
    pub disabled: bool,
    pub on_change: Callback<String>,
}

#[function_component(ResidentSelector)]
pub fn resident_selector(props: &ResidentSelectorProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <div class="form-group">
            <label for="residentSelect">{"Resident"}</label>
            <select
                id="residentSelect"
                class="form-control"
                disabled={props.disabled}
                {onchange}
            >
                if props.residents.is_empty() {
                    <option value="" selected=true>{"No residents"}</option>
                }
                { for props.residents.iter().map(|resident| {
                    let id = resident.resident_id.to_string();
                    let selected = id == props.selected;
                    html! {
                        <option value={id} {selected}>{ resident.label() }</option>
                    }
                }) }
            </select>
        </div>
    }
}
