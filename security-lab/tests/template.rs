// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
pub(crate) mod utils;

#[cfg(test)]
mod template_tests {
    use pretty_assertions::assert_eq;
    use security_lab::commands::{CONFIG, OUTPUT, PRINT_JSON, TEMPLATE};
    use security_lab::template::{
        sub, LabConfig, Template, LOGGING_BUCKET, RANDOM_STRING, SECURITY_OPERATOR_ROLE, TRAIL,
    };
    use security_lab::utils::reader::Reader;
    use security_lab::utils::writer::Writer;

    use crate::utils::{get_full_path_for_resource_file, CommandTestRunner, StatusCode};

    #[derive(Default)]
    struct TemplateTestRunner<'args> {
        config: Option<&'args str>,
        output: Option<String>,
        print_json: bool,
    }

    impl<'args> TemplateTestRunner<'args> {
        fn config(&'args mut self, arg: Option<&'args str>) -> &'args mut TemplateTestRunner {
            self.config = arg;
            self
        }

        fn output(&'args mut self, arg: Option<String>) -> &'args mut TemplateTestRunner {
            self.output = arg;
            self
        }

        fn print_json(&'args mut self, arg: bool) -> &'args mut TemplateTestRunner {
            self.print_json = arg;
            self
        }
    }

    impl<'args> CommandTestRunner for TemplateTestRunner<'args> {
        fn build_args(&self) -> Vec<String> {
            let mut args = vec![String::from(TEMPLATE)];

            if let Some(config) = self.config {
                args.push(format!("-{}", CONFIG.1));
                args.push(get_full_path_for_resource_file(config));
            }

            if let Some(output) = &self.output {
                args.push(format!("-{}", OUTPUT.1));
                args.push(output.clone());
            }

            if self.print_json {
                args.push(format!("--{}", PRINT_JSON.0));
            }

            args
        }
    }

    #[test]
    fn test_template_default_yaml() {
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = TemplateTestRunner::default().run(&mut writer, &mut reader);

        assert_eq!(StatusCode::SUCCESS, status_code);
        let rendered: Template = serde_yaml::from_str(&writer.into_string().unwrap()).unwrap();
        assert_eq!(
            Template::security_lab(&LabConfig::default()).unwrap(),
            rendered
        );
    }

    #[test]
    fn test_template_json_with_config() {
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = TemplateTestRunner::default()
            .config(Some("resources/template/training-config.yaml"))
            .print_json(true)
            .run(&mut writer, &mut reader);

        assert_eq!(StatusCode::SUCCESS, status_code);
        let rendered: Template = serde_json::from_str(&writer.into_string().unwrap()).unwrap();

        assert_eq!(
            "8",
            rendered.resource(RANDOM_STRING).unwrap().properties["StringLength"]
        );
        assert_eq!(
            sub("training-trail-${RandomString.RandomString}"),
            rendered.resource(TRAIL).unwrap().properties["TrailName"]
        );
        assert_eq!(
            3_i64,
            rendered.resource(LOGGING_BUCKET).unwrap().properties["LifecycleConfiguration"]
                ["Rules"][0]["ExpirationInDays"]
        );
        assert_eq!(
            2,
            rendered.resource(SECURITY_OPERATOR_ROLE).unwrap().properties["ManagedPolicyArns"]
                .as_array()
                .unwrap()
                .len()
        );
    }

    #[test]
    fn test_template_rejects_zero_length_config() {
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = TemplateTestRunner::default()
            .config(Some("resources/template/zero-length-config.json"))
            .run(&mut writer, &mut reader);

        assert_eq!(StatusCode::INPUT_ERROR, status_code);
        let (out, err) = writer.into_strings().unwrap();
        assert_eq!("", out);
        assert_eq!(
            "Invalid lab configuration, Error = Requested string length must be a positive integer, got `0`\n",
            err
        );
    }

    #[test]
    fn test_template_writes_output_file() {
        let path = std::env::temp_dir().join(format!(
            "security-lab-template-{}.yaml",
            std::process::id()
        ));
        let mut reader = Reader::default();
        let mut writer = Writer::default();
        let status_code = TemplateTestRunner::default()
            .output(Some(path.display().to_string()))
            .run(&mut writer, &mut reader);

        assert_eq!(StatusCode::SUCCESS, status_code);
        assert_eq!("", writer.into_string().unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let rendered: Template = serde_yaml::from_str(&content).unwrap();
        assert_eq!(13, rendered.resources.len());
        assert_eq!(3, rendered.outputs.len());
    }
}
