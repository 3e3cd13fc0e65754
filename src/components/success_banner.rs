use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SuccessBannerProps {
    pub message: AttrValue,
}

#[function_component(SuccessBanner)]
pub fn success_banner(props: &SuccessBannerProps) -> Html {
    html! {
        <div style="
            position: fixed;
            top: 20px;
            right: 20px;
            background: #10b981;
            color: white;
            padding: 1rem 1.5rem;
            border-radius: 0.5rem;
            box-shadow: 0 10px 25px rgba(0,0,0,0.1);
            z-index: 1001;
            animation: slideIn 0.3s ease;
        ">
            <i class="fas fa-check-circle"></i>
            {" "}
            { props.message.clone() }
        </div>
    }
}
