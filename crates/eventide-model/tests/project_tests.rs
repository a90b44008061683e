use eventide_model::{
    behavior_function_scope, DeclarationKind, Declaration, EventsFunctionsEntity, FunctionType, ModelError, Project,
    PropertyFunctionGenerator, VariableValue,
};

const PROJECT: &str = r#"{
    "name": "Platform game",
    "variables": [{"name": "Score", "value": {"number": 0.0}}],
    "scenes": [
        {
            "name": "Level1",
            "variables": [{"name": "Score", "value": {"number": 10.0}}],
            "objects": [
                {"name": "Hero", "type": "Sprite", "behaviors": [{"name": "Mover", "type": "Movement::Mover"}]},
                {"name": "Bat", "type": "Sprite"}
            ],
            "objectsFolderStructure": {
                "folderName": "__ROOT",
                "children": [
                    {"folderName": "Enemies", "children": [{"objectName": "Bat"}]},
                    {"itemName": "Ghost"}
                ]
            }
        }
    ],
    "eventsFunctionsExtensions": [
        {
            "name": "Movement",
            "version": "1.0.0",
            "dependencies": [{"type": "npm", "name": "easing", "exportName": "easing", "version": "1.0.0"}],
            "eventsBasedBehaviors": [
                {
                    "name": "Mover",
                    "objectType": "Sprite",
                    "eventsFunctions": [
                        {
                            "name": "doStepPreEvents",
                            "functionType": "Action",
                            "parameters": [{"name": "Speed", "type": "expression"}],
                            "events": [{"type": "BuiltinCommonInstructions::Comment", "comment": "move"}]
                        }
                    ],
                    "propertyDescriptors": [
                        {"name": "Speed", "type": "Number", "value": "200", "group": "Motion"},
                        {"name": "Smooth", "type": "Boolean", "value": "true"}
                    ],
                    "sharedPropertyDescriptors": [{"name": "Gravity", "type": "Number", "value": "900"}]
                }
            ]
        }
    ],
    "extensionProperties": {"Movement": {"Mode": "fast"}}
}"#;

#[test]
fn loads_and_rebuilds_folder_trees() {
    let project = Project::from_json_str(PROJECT).unwrap();

    let scene = project.scene("Level1").unwrap();
    let bat = scene.objects.node_of("Bat").unwrap();
    let enemies = scene.objects.folders().parent(bat).unwrap();
    assert_eq!(scene.objects.folders().folder_name(enemies), Some("Enemies"));
    // "Ghost" does not exist and "Hero" had no placement.
    let root = scene.objects.folders().root();
    assert_eq!(scene.objects.folders().children_count(root), 2);
    assert!(scene.objects.node_of("Hero").is_some());

    let behavior = project.extension("Movement").unwrap().behavior("Mover").unwrap();
    let speed = behavior.properties().node_of("Speed").unwrap();
    let motion = behavior.properties().folders().parent(speed).unwrap();
    assert_eq!(behavior.properties().folders().folder_name(motion), Some("Motion"));
    assert_eq!(behavior.properties().get("Speed").unwrap().group, "Motion");

    assert_eq!(project.extension_properties.get_value("Movement", "Mode"), Some("fast"));
}

#[test]
fn round_trip_is_stable() {
    let project = Project::from_json_str(PROJECT).unwrap();
    let first = project.to_json_string().unwrap();
    let reloaded = Project::from_json_str(&first).unwrap();
    let second = reloaded.to_json_string().unwrap();
    assert_eq!(first, second);

    let written: serde_json::Value = serde_json::from_str(&first).unwrap();
    let scene = &written["scenes"][0];
    assert_eq!(
        scene["objectsFolderStructure"]["children"][0]["children"][0]["itemName"],
        "Bat"
    );
    assert!(scene["objectsFolderStructure"]["children"][0]["children"][0]
        .get("objectName")
        .is_none());
    let function = &written["eventsFunctionsExtensions"][0]["eventsBasedBehaviors"][0]["eventsFunctions"][0];
    assert_eq!(function["events"][0]["comment"], "move");
}

#[test]
fn scopes_over_a_loaded_project() {
    let project = Project::from_json_str(PROJECT).unwrap();

    let scene_scope = project.scene_scope("Level1").unwrap();
    assert_eq!(
        scene_scope.get("Score").map(|variable| variable.value.clone()),
        Some(VariableValue::Number(10.0))
    );

    let extension = project.extension("Movement").unwrap();
    let behavior = extension.behavior("Mover").unwrap();
    let function = behavior.functions().get("doStepPreEvents").unwrap();
    let chain = behavior_function_scope(extension, behavior, function);
    assert_eq!(
        chain.get("Speed").map(|declaration| declaration.declaration_kind()),
        Some(DeclarationKind::Parameter)
    );
    assert_eq!(
        chain.get("Gravity").map(|declaration| declaration.declaration_kind()),
        Some(DeclarationKind::Property)
    );
    assert!(chain.get("Score").is_none());
}

#[test]
fn generated_accessors_survive_a_round_trip() {
    let mut project = Project::from_json_str(PROJECT).unwrap();
    let behavior = project
        .extension_mut("Movement")
        .unwrap()
        .behavior_mut("Mover")
        .unwrap();
    assert!(PropertyFunctionGenerator::generate_behavior_getter_and_setter(
        "Movement", behavior, "Smooth"
    ));

    let reloaded = Project::from_json_str(&project.to_json_string().unwrap()).unwrap();
    let functions = reloaded
        .extension("Movement")
        .unwrap()
        .behavior("Mover")
        .unwrap()
        .functions();
    assert_eq!(functions.get("Smooth").unwrap().function_type, FunctionType::Condition);
    assert_eq!(functions.get("SetSmooth").unwrap().function_type, FunctionType::Action);
}

#[test]
fn missing_files_are_io_errors() {
    let error = Project::load(std::path::Path::new("/nonexistent/eventide/project.json")).unwrap_err();
    assert!(matches!(error, ModelError::Io { .. }));
}
