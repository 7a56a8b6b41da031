// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
pub(crate) mod utils;

#[cfg(test)]
mod invoke_tests {
    use pretty_assertions::assert_eq;
    use security_lab::commands::{EVENT, INVOKE};
    use security_lab::custom_resource::{CustomResourceResponse, ResponseStatus};
    use security_lab::utils::reader::Reader;
    use security_lab::utils::writer::Writer;

    use crate::utils::{
        get_full_path_for_resource_file, read_from_resource_file, CommandTestRunner, StatusCode,
    };

    #[derive(Default)]
    struct InvokeTestRunner<'args> {
        event: Option<&'args str>,
    }

    impl<'args> InvokeTestRunner<'args> {
        fn event(&'args mut self, arg: Option<&'args str>) -> &'args mut InvokeTestRunner {
            self.event = arg;
            self
        }
    }

    impl<'args> CommandTestRunner for InvokeTestRunner<'args> {
        fn build_args(&self) -> Vec<String> {
            let mut args = vec![String::from(INVOKE)];

            if let Some(event) = self.event {
                args.push(format!("-{}", EVENT.1));
                args.push(get_full_path_for_resource_file(event));
            }

            args
        }
    }

    fn parse_response(writer: Writer) -> CustomResourceResponse {
        let out = writer.into_string().unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_invoke_create_from_file() {
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = InvokeTestRunner::default()
            .event(Some("resources/invoke/create-request.json"))
            .run(&mut writer, &mut reader);

        assert_eq!(StatusCode::SUCCESS, status_code);
        let response = parse_response(writer);
        assert_eq!(ResponseStatus::Success, response.status);
        assert_eq!(
            "RandomString-3f6a7f0e-1b0c-4d67-9a6e-1e2f3a4b5c6d",
            response.physical_resource_id
        );
        let value = response.random_string().unwrap();
        assert_eq!(12, value.len());
        assert!(value.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_invoke_delete_from_stdin() {
        let mut reader = Reader::from_content(&read_from_resource_file(
            "resources/invoke/delete-request.json",
        ));
        let mut writer = Writer::default();
        let status_code = InvokeTestRunner::default().run(&mut writer, &mut reader);

        assert_eq!(StatusCode::SUCCESS, status_code);
        let response = parse_response(writer);
        assert!(response.is_success());
        assert_eq!(None, response.data);
        assert_eq!(
            "RandomString-3f6a7f0e-1b0c-4d67-9a6e-1e2f3a4b5c6d",
            response.physical_resource_id
        );
    }

    #[test]
    fn test_invoke_invalid_length_reports_failure() {
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = InvokeTestRunner::default()
            .event(Some("resources/invoke/invalid-length-request.json"))
            .run(&mut writer, &mut reader);

        assert_eq!(StatusCode::HANDLER_FAILURE, status_code);
        let expected: serde_json::Value = serde_json::from_str(&read_from_resource_file(
            "resources/invoke/invalid-length-response.json",
        ))
        .unwrap();
        let actual: serde_json::Value =
            serde_json::from_str(&writer.into_string().unwrap()).unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_invoke_malformed_event() {
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = InvokeTestRunner::default()
            .event(Some("resources/invoke/malformed-request.json"))
            .run(&mut writer, &mut reader);

        assert_eq!(StatusCode::INPUT_ERROR, status_code);
        let (out, err) = writer.into_strings().unwrap();
        assert_eq!("", out);
        assert!(err.starts_with("Parsing error handling event, Error = "));
    }

    #[test]
    fn test_invoke_missing_event_file() {
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = InvokeTestRunner::default()
            .event(Some("resources/invoke/does-not-exist.json"))
            .run(&mut writer, &mut reader);

        assert_eq!(StatusCode::INTERNAL_FAILURE, status_code);
        let err = writer.err_to_string().unwrap();
        assert!(err.starts_with("Error occurred I/O error when reading"));
    }
}
