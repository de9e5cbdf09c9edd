//! Catalog of known data item types.
//!
//! Maps each UPPER_SNAKE type id to its category and its PascalCase element
//! name. Ids missing from the table fall back to a mechanical case conversion,
//! so the catalog only has to be complete enough to fix irregular names and to
//! give samples and events a stable output order.

use mtc_core::Category;
use mtc_core::Category::{Event, Sample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataItemType {
    pub id: &'static str,
    pub category: Category,
    pub element: &'static str,
}

impl DataItemType {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.id.to_ascii_lowercase().contains(&query)
            || self.element.to_ascii_lowercase().contains(&query)
    }
}

const fn t(id: &'static str, category: Category, element: &'static str) -> DataItemType {
    DataItemType {
        id,
        category,
        element,
    }
}

const DATA_ITEM_TYPES: &[DataItemType] = &[
    t("ACCELERATION", Sample, "Acceleration"),
    t("ACCUMULATED_TIME", Sample, "AccumulatedTime"),
    t("AMPERAGE_AC", Sample, "AmperageAC"),
    t("AMPERAGE_DC", Sample, "AmperageDC"),
    t("ANGLE", Sample, "Angle"),
    t("ANGULAR_ACCELERATION", Sample, "AngularAcceleration"),
    t("ANGULAR_DECELERATION", Sample, "AngularDeceleration"),
    t("ANGULAR_VELOCITY", Sample, "AngularVelocity"),
    t("ASSET_UPDATE_RATE", Sample, "AssetUpdateRate"),
    t("AXIS_FEEDRATE", Sample, "AxisFeedrate"),
    t("BATTERY_CAPACITY", Sample, "BatteryCapacity"),
    t("BATTERY_CHARGE", Sample, "BatteryCharge"),
    t("CAPACITY_FLUID", Sample, "CapacityFluid"),
    t("CAPACITY_SPATIAL", Sample, "CapacitySpatial"),
    t("CHARGE_RATE", Sample, "ChargeRate"),
    t("CONCENTRATION", Sample, "Concentration"),
    t("CONDUCTIVITY", Sample, "Conductivity"),
    t("CUTTING_SPEED", Sample, "CuttingSpeed"),
    t("DECELERATION", Sample, "Deceleration"),
    t("DENSITY", Sample, "Density"),
    t("DEPOSITION_ACCELERATION_VOLUMETRIC", Sample, "DepositionAccelerationVolumetric"),
    t("DEPOSITION_DENSITY", Sample, "DepositionDensity"),
    t("DEPOSITION_MASS", Sample, "DepositionMass"),
    t("DEPOSITION_RATE_VOLUMETRIC", Sample, "DepositionRateVolumetric"),
    t("DEPOSITION_VOLUME", Sample, "DepositionVolume"),
    t("DIAMETER", Sample, "Diameter"),
    t("DISCHARGE_RATE", Sample, "DischargeRate"),
    t("DISPLACEMENT", Sample, "Displacement"),
    t("DISPLACEMENT_ANGULAR", Sample, "DisplacementAngular"),
    t("DISPLACEMENT_LINEAR", Sample, "DisplacementLinear"),
    t("ELECTRICAL_ENERGY", Sample, "ElectricalEnergy"),
    t("EQUIPMENT_TIMER", Sample, "EquipmentTimer"),
    t("FILL_LEVEL", Sample, "FillLevel"),
    t("FLOW", Sample, "Flow"),
    t("FOLLOWING_ERROR", Sample, "FollowingError"),
    t("FREQUENCY", Sample, "Frequency"),
    t("GLOBAL_POSITION", Sample, "GlobalPosition"),
    t("GRAVITATIONAL_ACCELERATION", Sample, "GravitationalAcceleration"),
    t("GRAVITATIONAL_FORCE", Sample, "GravitationalForce"),
    t("HUMIDITY_ABSOLUTE", Sample, "HumidityAbsolute"),
    t("HUMIDITY_RELATIVE", Sample, "HumidityRelative"),
    t("HUMIDITY_SPECIFIC", Sample, "HumiditySpecific"),
    t("LENGTH", Sample, "Length"),
    t("LEVEL", Sample, "Level"),
    t("LINEAR_FORCE", Sample, "LinearForce"),
    t("LOAD", Sample, "Load"),
    t("MASS", Sample, "Mass"),
    t("OBSERVATION_UPDATE_RATE", Sample, "ObservationUpdateRate"),
    t("ORIENTATION", Sample, "Orientation"),
    t("PATH_FEEDRATE", Sample, "PathFeedrate"),
    t("PATH_FEEDRATE_PER_REVOLUTION", Sample, "PathFeedratePerRevolution"),
    t("PATH_POSITION", Sample, "PathPosition"),
    t("PH", Sample, "PH"),
    t("POSITION", Sample, "Position"),
    t("POSITION_CARTESIAN", Sample, "PositionCartesian"),
    t("POWER_FACTOR", Sample, "PowerFactor"),
    t("PRESSURE", Sample, "Pressure"),
    t("PRESSURE_ABSOLUTE", Sample, "PressureAbsolute"),
    t("PRESSURIZATION_RATE", Sample, "PressurizationRate"),
    t("PROCESS_TIMER", Sample, "ProcessTimer"),
    t("RESISTANCE", Sample, "Resistance"),
    t("RESISTIVITY", Sample, "Resistivity"),
    t("ROTARY_VELOCITY", Sample, "RotaryVelocity"),
    t("SETTLING_ERROR", Sample, "SettlingError"),
    t("SOUND_LEVEL", Sample, "SoundLevel"),
    t("SPINDLE_SPEED", Sample, "SpindleSpeed"),
    t("STRAIN", Sample, "Strain"),
    t("TEMPERATURE", Sample, "Temperature"),
    t("TENSION", Sample, "Tension"),
    t("TILT", Sample, "Tilt"),
    t("TORQUE", Sample, "Torque"),
    t("VELOCITY", Sample, "Velocity"),
    t("VISCOSITY", Sample, "Viscosity"),
    t("VOLTAGE_AC", Sample, "VoltageAC"),
    t("VOLTAGE_DC", Sample, "VoltageDC"),
    t("VOLT_AMPERE", Sample, "VoltAmpere"),
    t("VOLT_AMPERE_REACTIVE", Sample, "VoltAmpereReactive"),
    t("VOLUME_FLUID", Sample, "VolumeFluid"),
    t("VOLUME_SPATIAL", Sample, "VolumeSpatial"),
    t("WATTAGE", Sample, "Wattage"),
    t("X_DIMENSION", Sample, "XDimension"),
    t("Y_DIMENSION", Sample, "YDimension"),
    t("Z_DIMENSION", Sample, "ZDimension"),
    t("ACTIVE_AXES", Event, "ActiveAxes"),
    t("ACTUATOR_STATE", Event, "ActuatorState"),
    t("ADAPTER_SOFTWARE_VERSION", Event, "AdapterSoftwareVersion"),
    t("ADAPTER_URI", Event, "AdapterURI"),
    t("ALARM_LIMIT", Event, "AlarmLimit"),
    t("APPLICATION", Event, "Application"),
    t("AVAILABILITY", Event, "Availability"),
    t("AXIS_COUPLING", Event, "AxisCoupling"),
    t("AXIS_FEEDRATE_OVERRIDE", Event, "AxisFeedrateOverride"),
    t("AXIS_INTERLOCK", Event, "AxisInterlock"),
    t("AXIS_STATE", Event, "AxisState"),
    t("BLOCK", Event, "Block"),
    t("BLOCK_COUNT", Event, "BlockCount"),
    t("CHUCK_INTERLOCK", Event, "ChuckInterlock"),
    t("CHUCK_STATE", Event, "ChuckState"),
    t("CODE", Event, "Code"),
    t("COMPOSITION_STATE", Event, "CompositionState"),
    t("CONTROL_LIMIT", Event, "ControlLimit"),
    t("CONTROLLER_MODE", Event, "ControllerMode"),
    t("CONTROLLER_MODE_OVERRIDE", Event, "ControllerModeOverride"),
    t("COUPLED_AXES", Event, "CoupledAxes"),
    t("DATE_CODE", Event, "DateCode"),
    t("DEVICE_ADDED", Event, "DeviceAdded"),
    t("DEVICE_CHANGED", Event, "DeviceChanged"),
    t("DEVICE_REMOVED", Event, "DeviceRemoved"),
    t("DEVICE_UUID", Event, "DeviceUuid"),
    t("DIRECTION", Event, "Direction"),
    t("DOOR_STATE", Event, "DoorState"),
    t("EMERGENCY_STOP", Event, "EmergencyStop"),
    t("END_OF_BAR", Event, "EndOfBar"),
    t("EQUIPMENT_MODE", Event, "EquipmentMode"),
    t("EXECUTION", Event, "Execution"),
    t("FIRMWARE", Event, "Firmware"),
    t("FUNCTIONAL_MODE", Event, "FunctionalMode"),
    t("HARDNESS", Event, "Hardness"),
    t("LIBRARY", Event, "Library"),
    t("LINE_LABEL", Event, "LineLabel"),
    t("LINE_NUMBER", Event, "LineNumber"),
    t("LOAD_COUNT", Event, "LoadCount"),
    t("LOCATION_ADDRESS", Event, "LocationAddress"),
    t("LOCK_STATE", Event, "LockState"),
    t("MAINTENANCE_LIST", Event, "MaintenanceList"),
    t("MATERIAL", Event, "Material"),
    t("MATERIAL_LAYER", Event, "MaterialLayer"),
    t("MESSAGE", Event, "Message"),
    t("MTCONNECT_VERSION", Event, "MTConnectVersion"),
    t("NETWORK", Event, "Network"),
    t("OPERATING_MODE", Event, "OperatingMode"),
    t("OPERATING_SYSTEM", Event, "OperatingSystem"),
    t("OPERATOR_ID", Event, "OperatorId"),
    t("PALLET_ID", Event, "PalletId"),
    t("PART_COUNT", Event, "PartCount"),
    t("PART_COUNT_TYPE", Event, "PartCountType"),
    t("PART_DETECT", Event, "PartDetect"),
    t("PART_GROUP_ID", Event, "PartGroupId"),
    t("PART_ID", Event, "PartId"),
    t("PART_KIND_ID", Event, "PartKindId"),
    t("PART_NUMBER", Event, "PartNumber"),
    t("PART_PROCESSING_STATE", Event, "PartProcessingState"),
    t("PART_STATUS", Event, "PartStatus"),
    t("PART_UNIQUE_ID", Event, "PartUniqueId"),
    t("PATH_FEEDRATE_OVERRIDE", Event, "PathFeedrateOverride"),
    t("PATH_MODE", Event, "PathMode"),
    t("POWER_STATE", Event, "PowerState"),
    t("POWER_STATUS", Event, "PowerStatus"),
    t("PROCESS_AGGREGATE_ID", Event, "ProcessAggregateId"),
    t("PROCESS_KIND_ID", Event, "ProcessKindId"),
    t("PROCESS_OCCURRENCE_ID", Event, "ProcessOccurrenceId"),
    t("PROCESS_STATE", Event, "ProcessState"),
    t("PROCESS_TIME", Event, "ProcessTime"),
    t("PROGRAM", Event, "Program"),
    t("PROGRAM_COMMENT", Event, "ProgramComment"),
    t("PROGRAM_EDIT", Event, "ProgramEdit"),
    t("PROGRAM_EDIT_NAME", Event, "ProgramEditName"),
    t("PROGRAM_HEADER", Event, "ProgramHeader"),
    t("PROGRAM_LOCATION", Event, "ProgramLocation"),
    t("PROGRAM_LOCATION_TYPE", Event, "ProgramLocationType"),
    t("PROGRAM_NEST_LEVEL", Event, "ProgramNestLevel"),
    t("ROTARY_MODE", Event, "RotaryMode"),
    t("ROTARY_VELOCITY_OVERRIDE", Event, "RotaryVelocityOverride"),
    t("ROTATION", Event, "Rotation"),
    t("SENSOR_ATTACHMENT", Event, "SensorAttachment"),
    t("SERIAL_NUMBER", Event, "SerialNumber"),
    t("SPECIFICATION_LIMIT", Event, "SpecificationLimit"),
    t("SPINDLE_INTERLOCK", Event, "SpindleInterlock"),
    t("THICKNESS", Event, "Thickness"),
    t("TOOL_ASSET_ID", Event, "ToolAssetId"),
    t("TOOL_GROUP", Event, "ToolGroup"),
    t("TOOL_ID", Event, "ToolId"),
    t("TOOL_NUMBER", Event, "ToolNumber"),
    t("TOOL_OFFSET", Event, "ToolOffset"),
    t("USER", Event, "User"),
    t("VARIABLE", Event, "Variable"),
    t("WAIT_STATE", Event, "WaitState"),
    t("WIRE", Event, "Wire"),
    t("WORK_OFFSET", Event, "WorkOffset"),
    t("WORKHOLDING_ID", Event, "WorkholdingId"),
];

pub fn data_item_types() -> &'static [DataItemType] {
    DATA_ITEM_TYPES
}

pub fn filter_data_item_types(query: &str) -> Vec<DataItemType> {
    data_item_types()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Position of a type in catalog order, used to order output fields.
pub fn position(id: &str) -> Option<usize> {
    DATA_ITEM_TYPES.iter().position(|entry| entry.id == id)
}

pub fn lookup(id: &str) -> Option<&'static DataItemType> {
    DATA_ITEM_TYPES.iter().find(|entry| entry.id == id)
}

pub fn lookup_element(element: &str) -> Option<&'static DataItemType> {
    DATA_ITEM_TYPES.iter().find(|entry| entry.element == element)
}

/// Element name for a type id: catalog first, then `FOO_BAR` -> `FooBar`.
pub fn element_name(id: &str) -> String {
    match lookup(id) {
        Some(entry) => entry.element.to_string(),
        None => pascal_case(id),
    }
}

/// Type id for an element name: catalog first, then `FooBar` -> `FOO_BAR`.
pub fn type_id_for_element(element: &str) -> String {
    match lookup_element(element) {
        Some(entry) => entry.id.to_string(),
        None => upper_snake_case(element),
    }
}

fn pascal_case(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for word in id.split('_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

fn upper_snake_case(element: &str) -> String {
    let chars: Vec<char> = element.chars().collect();
    let mut out = String::with_capacity(element.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_and_elements_are_unique() {
        let mut ids = HashSet::new();
        let mut elements = HashSet::new();
        for entry in data_item_types() {
            assert!(ids.insert(entry.id), "duplicate type id: {}", entry.id);
            assert!(
                elements.insert(entry.element),
                "duplicate element: {}",
                entry.element
            );
        }
    }

    #[test]
    fn irregular_names_come_from_the_table() {
        assert_eq!(element_name("PH"), "PH");
        assert_eq!(element_name("AMPERAGE_AC"), "AmperageAC");
        assert_eq!(element_name("MTCONNECT_VERSION"), "MTConnectVersion");
        assert_eq!(type_id_for_element("AdapterURI"), "ADAPTER_URI");
    }

    #[test]
    fn unknown_ids_use_case_conversion() {
        assert_eq!(element_name("SPINDLE_WOBBLE"), "SpindleWobble");
        assert_eq!(type_id_for_element("SpindleWobble"), "SPINDLE_WOBBLE");
        assert_eq!(type_id_for_element("XRay2Count"), "X_RAY2_COUNT");
    }

    #[test]
    fn case_conversion_agrees_with_table_for_regular_names() {
        for entry in data_item_types() {
            if pascal_case(entry.id) == entry.element {
                assert_eq!(upper_snake_case(entry.element), entry.id);
            }
        }
    }

    #[test]
    fn search_finds_feedrates() {
        let results = filter_data_item_types("feedrate");
        assert!(results.iter().any(|e| e.id == "PATH_FEEDRATE"));
        assert!(results.iter().all(|e| e.id.contains("FEEDRATE")));
    }
}
