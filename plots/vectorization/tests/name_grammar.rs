use common::series::Aggregate;
use proptest::prelude::*;
use vectorization::TemplatedName;

prop_compose! {
    fn arb_name()(
        function in "[A-Za-z0-9_]{1,16}",
        template_type in prop_oneof![Just(String::new()), "[A-Za-z0-9_:, ]{1,12}", "[a-z]{1,6}<[a-z]{1,6}>"],
        input_size in 0i64..=i64::MAX,
        stddev in any::<bool>(),
    ) -> TemplatedName {
        TemplatedName {
            function,
            template_type,
            input_size,
            aggregate: if stddev { Aggregate::Stddev } else { Aggregate::Mean },
        }
    }
}

proptest! {
    #[test]
    fn rendered_name_parses_back(name in arb_name()) {
        let rendered = name.to_string();
        let parsed: TemplatedName = rendered.parse().expect("parse rendered name");
        prop_assert_eq!(&parsed, &name);
        prop_assert_eq!(parsed.to_string(), rendered);
    }

    #[test]
    fn parser_never_panics(name in "\\PC{0,40}") {
        let _ = name.parse::<TemplatedName>();
    }
}
